mod push_csv;

pub use push_csv::push_csv;
