pub mod probe_tests;
