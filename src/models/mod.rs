pub mod exam;
