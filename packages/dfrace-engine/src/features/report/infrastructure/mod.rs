/// Report renderers and writers
pub mod graph_writer;
pub mod summary;

pub use graph_writer::GraphWriter;
pub use summary::SummaryReporter;
