//! Mounting remotes as local directories
//!
//! Mounts run as long-lived rclone processes detached from this program. A
//! short grace period catches mounts that die immediately (bad credentials,
//! missing FUSE) so their stderr can be surfaced instead of a silent empty
//! directory.

use super::Rclone;
use directories::BaseDirs;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::process::Command;

/// How long to watch a fresh mount process before declaring it healthy
const MOUNT_GRACE: Duration = Duration::from_secs(2);

#[derive(Debug, thiserror::Error)]
pub enum MountError {
    #[error("Could not determine home directory")]
    NoHomeDir,

    #[error("{0} is already mounted")]
    AlreadyMounted(PathBuf),

    #[error("{0} is not a mountpoint")]
    NotMounted(PathBuf),

    #[error("Mount failed: {0}")]
    MountFailed(String),

    #[error("Unmount failed: {0}")]
    UnmountFailed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Default mountpoint for a remote: `<base>/<remote>`, or `~/mnt/<remote>`
pub fn mount_dir(base: Option<&Path>, remote: &str) -> Result<PathBuf, MountError> {
    let base = match base {
        Some(base) => base.to_path_buf(),
        None => BaseDirs::new()
            .ok_or(MountError::NoHomeDir)?
            .home_dir()
            .join("mnt"),
    };
    Ok(base.join(remote))
}

/// Check whether `path` is an active mountpoint
pub async fn is_mounted(path: &Path) -> bool {
    let probe = Command::new("mountpoint")
        .arg("-q")
        .arg(path)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;

    match probe {
        Ok(status) => status.success(),
        // No mountpoint(1) on this system; a mountpoint sits on a different
        // device than its parent.
        Err(_) => device_differs_from_parent(path),
    }
}

#[cfg(unix)]
fn device_differs_from_parent(path: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    let parent = match path.parent() {
        Some(parent) => parent,
        None => return false,
    };

    match (std::fs::metadata(path), std::fs::metadata(parent)) {
        (Ok(own), Ok(parents)) => own.dev() != parents.dev(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn device_differs_from_parent(_path: &Path) -> bool {
    false
}

/// Mount `remote:` at `mountpoint`, leaving the rclone process running
///
/// The mountpoint is created if missing. If the mount process exits within
/// the grace period its stderr becomes the error message; otherwise it is
/// left running detached.
pub async fn mount_remote(
    rclone: &Rclone,
    remote: &str,
    mountpoint: &Path,
    vfs_cache_mode: &str,
) -> Result<(), MountError> {
    if is_mounted(mountpoint).await {
        return Err(MountError::AlreadyMounted(mountpoint.to_path_buf()));
    }

    std::fs::create_dir_all(mountpoint)?;

    let target = format!("{remote}:");
    tracing::info!("Mounting {} at {:?}", target, mountpoint);

    let mut child = Command::new(rclone.binary())
        .arg("mount")
        .arg(&target)
        .arg(mountpoint)
        .arg("--vfs-cache-mode")
        .arg(vfs_cache_mode)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(false)
        .spawn()?;

    match tokio::time::timeout(MOUNT_GRACE, child.wait()).await {
        Ok(status) => {
            let status = status?;
            let mut stderr = String::new();
            if let Some(mut pipe) = child.stderr.take() {
                let _ = pipe.read_to_string(&mut stderr).await;
            }
            let detail = if stderr.trim().is_empty() {
                status.to_string()
            } else {
                stderr.trim().to_string()
            };
            Err(MountError::MountFailed(detail))
        }
        // Still running after the grace period; treat as mounted and detach.
        Err(_) => {
            tracing::info!("Mounted {} at {:?}", target, mountpoint);
            Ok(())
        }
    }
}

/// Unmount a mountpoint, preferring fusermount and falling back to umount
pub async fn unmount_remote(mountpoint: &Path) -> Result<(), MountError> {
    if !is_mounted(mountpoint).await {
        return Err(MountError::NotMounted(mountpoint.to_path_buf()));
    }

    tracing::info!("Unmounting {:?}", mountpoint);

    for unmounter in [&["fusermount", "-u"][..], &["umount"][..]] {
        let output = Command::new(unmounter[0])
            .args(&unmounter[1..])
            .arg(mountpoint)
            .stdin(Stdio::null())
            .output()
            .await;

        match output {
            Ok(output) if output.status.success() => return Ok(()),
            Ok(output) => {
                tracing::debug!(
                    "{} failed: {}",
                    unmounter[0],
                    String::from_utf8_lossy(&output.stderr).trim()
                );
            }
            Err(e) => tracing::debug!("{} unavailable: {}", unmounter[0], e),
        }
    }

    Err(MountError::UnmountFailed(format!(
        "neither fusermount nor umount could release {}",
        mountpoint.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_dir_with_explicit_base() {
        let dir = mount_dir(Some(Path::new("/srv/mounts")), "backup").unwrap();
        assert_eq!(dir, PathBuf::from("/srv/mounts/backup"));
    }

    #[test]
    fn test_mount_dir_defaults_under_home() {
        let dir = mount_dir(None, "backup").unwrap();
        assert!(dir.ends_with("mnt/backup"));
    }

    #[tokio::test]
    async fn test_plain_directory_is_not_mounted() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_mounted(dir.path()).await);
    }

    #[tokio::test]
    async fn test_unmount_plain_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = unmount_remote(dir.path()).await.unwrap_err();
        assert!(matches!(err, MountError::NotMounted(_)));
    }
}
