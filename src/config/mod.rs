// Configuration files

pub mod variables_file;

pub use variables_file::VariablesFile;
