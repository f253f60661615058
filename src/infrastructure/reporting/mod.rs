mod catalog;
mod random_report_generator;

pub use random_report_generator::RandomReportGenerator;
