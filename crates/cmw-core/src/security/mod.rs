mod secret;

pub use secret::SecretString;
