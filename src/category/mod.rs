mod resolver;

pub use resolver::resolve_category;
