use crate::core::{GenError, GenResult};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sha2::{Digest, Sha512};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read buffer size when hashing downloaded artifacts.
const CHUNK_SIZE: usize = 4096;

/// SHA-512 of a file, encoded the way NuGet publishes `.sha512` sidecars:
/// base64 of the raw digest bytes.
pub fn sha512_base64(path: &Path) -> GenResult<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha512::new();
    let mut buf = [0u8; CHUNK_SIZE];

    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(BASE64.encode(hasher.finalize()))
}

/// Re-encode a sidecar's base64 digest as the lowercase hex string
/// flatpak-builder expects in a source's `sha512` field.
pub fn sidecar_to_hex(sidecar_path: &Path, contents: &str) -> GenResult<String> {
    let digest = BASE64
        .decode(contents.trim())
        .map_err(|e| GenError::Sidecar {
            path: sidecar_path.to_path_buf(),
            detail: e.to_string(),
        })?;
    Ok(hex::encode(digest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_sidecar_to_hex_decodes_base64() {
        // base64 "YWJj" is the bytes "abc"
        let hex = sidecar_to_hex(Path::new("x.nupkg.sha512"), "YWJj").unwrap();
        assert_eq!(hex, "616263");
    }

    #[test]
    fn test_sidecar_to_hex_trims_trailing_newline() {
        let hex = sidecar_to_hex(Path::new("x.nupkg.sha512"), "YWJj\n").unwrap();
        assert_eq!(hex, "616263");
    }

    #[test]
    fn test_sidecar_to_hex_rejects_invalid_base64() {
        let result = sidecar_to_hex(Path::new("bad.nupkg.sha512"), "!!not base64!!");
        match result {
            Err(GenError::Sidecar { path, .. }) => {
                assert_eq!(path, Path::new("bad.nupkg.sha512"))
            }
            other => panic!("expected sidecar error, got {:?}", other),
        }
    }

    #[test]
    fn test_sha512_base64_round_trip() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("artifact.nupkg");
        fs::write(&file, b"package bytes").unwrap();

        let encoded = sha512_base64(&file).unwrap();
        let rehexed = sidecar_to_hex(&file, &encoded).unwrap();

        let direct = hex::encode(Sha512::digest(b"package bytes"));
        assert_eq!(rehexed, direct);
    }

    #[test]
    fn test_sha512_base64_empty_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("empty.nupkg");
        fs::write(&file, b"").unwrap();

        let encoded = sha512_base64(&file).unwrap();
        let direct = hex::encode(Sha512::digest(b""));
        assert_eq!(sidecar_to_hex(&file, &encoded).unwrap(), direct);
    }

    #[test]
    fn test_sha512_base64_missing_file() {
        let temp = TempDir::new().unwrap();
        assert!(sha512_base64(&temp.path().join("nope.nupkg")).is_err());
    }
}
