mod append_tests;
mod helpers;
mod result_tests;
