// Test modules for latent-contracts
//
// Each source area has a corresponding test file that focuses on
// business rule verification. Cross-module behavior lives in tests/.

pub mod error;
pub mod registry;
