// Text handling — stopword resources, token normalization, sentence splitting.

pub mod normalize;
pub mod resources;
pub mod sentences;
