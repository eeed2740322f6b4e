pub mod annotations;
pub mod connections;
pub mod counting;
pub mod coverage;
pub mod overlaps;
pub mod table;
