mod read;

pub use read::read_attribute_table;
