#[derive(Debug, Clone, PartialEq)]
pub struct AlignedBlock {
    pub speaker: String,
    pub start: f64,
    pub text: String,
}
