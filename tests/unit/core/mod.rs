pub mod test_errors;
