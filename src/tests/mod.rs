pub mod store_tests;
