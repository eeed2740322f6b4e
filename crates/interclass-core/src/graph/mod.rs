pub mod class_registry;
pub mod network_index;
pub mod reverse_index;
