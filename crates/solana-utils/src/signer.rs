use solana_sdk::signature::{read_keypair_file, Keypair};

/// Load a keypair from a file containing a JSON array of secret key bytes.
///
/// `~` and environment variables in `path` are expanded.
pub fn load_keypair(path: &str) -> crate::Result<Keypair> {
    let expanded = shellexpand::full(path).map_err(|err| crate::Error::LoadKeypair {
        path: path.to_string(),
        message: err.to_string(),
    })?;
    read_keypair_file(&*expanded).map_err(|err| crate::Error::LoadKeypair {
        path: expanded.to_string(),
        message: err.to_string(),
    })
}
