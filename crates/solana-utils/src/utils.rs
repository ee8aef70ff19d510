use solana_sdk::signature::Signature;
use url::Url;

/// Build the explorer URL of a transaction.
pub fn explorer_tx_url(explorer: &Url, signature: &Signature) -> crate::Result<Url> {
    Ok(explorer.join(&format!("tx/{signature}"))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tx_url() {
        let explorer = Url::parse("https://explorer.trashscan.io/").unwrap();
        let signature = Signature::default();
        let url = explorer_tx_url(&explorer, &signature).unwrap();
        assert_eq!(
            url.as_str(),
            format!("https://explorer.trashscan.io/tx/{signature}")
        );
    }
}
