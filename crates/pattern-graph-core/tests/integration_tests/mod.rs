mod config_tests;
mod query_tests;
mod workflow_tests;
