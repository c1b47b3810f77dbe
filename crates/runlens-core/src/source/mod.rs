mod loader;
mod writer;

pub use loader::TextLoader;
pub use writer::SummaryWriter;
