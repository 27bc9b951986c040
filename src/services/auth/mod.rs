pub mod factory;
pub mod token_verifier;

pub use factory::build_token_verifier;
pub use token_verifier::TokenVerifier;

#[cfg(test)]
pub mod test_support;
