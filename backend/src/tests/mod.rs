mod common;
mod locale_redirect_test;
