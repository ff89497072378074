pub mod owner;
pub mod yaml;

pub use owner::OwnerExtractor;
pub use yaml::YamlReferenceExtractor;
