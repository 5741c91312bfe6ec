mod record_tests;
mod render_tests;
