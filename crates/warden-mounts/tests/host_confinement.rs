//! Integration tests driving the host-backed view against real
//! directories and symbolic links.
#![cfg(unix)]
#![expect(
    clippy::expect_used,
    reason = "tests assert on fixtures they just created"
)]

use std::collections::HashMap;
use std::fs;
use std::os::unix::fs::symlink;
use std::path::Path;

use warden_mounts::{
    DirProbe, FsError, FsView, GuestMemory, HostFs, LinkPolicy, MountTable, SandboxFs,
    add_mount_spec, copy_host_path_from_guest,
};
use warden_paths::{canonicalise, canonicalise_with};

/// Guest memory holding fixed strings at fixed addresses.
struct StaticGuest {
    strings: HashMap<u32, String>,
}

impl StaticGuest {
    fn holding(src: u32, value: &str) -> Self {
        let mut strings = HashMap::new();
        strings.insert(src, value.to_owned());
        Self { strings }
    }
}

impl GuestMemory for StaticGuest {
    fn copy_string(&self, src: u32, max_len: usize) -> Result<String, FsError> {
        let value = self.strings.get(&src).ok_or(FsError::BadAddress)?;
        if value.len() + 1 > max_len {
            return Err(FsError::NameTooLong);
        }
        Ok(value.clone())
    }
}

fn utf8(path: &Path) -> String {
    path.to_str().expect("temporary paths are UTF-8").to_owned()
}

/// Builds a mounted data directory holding:
/// `sub/file.txt`, `escape` -> `/`, and `up` -> `../`.
fn fixture() -> (tempfile::TempDir, String) {
    let root = tempfile::tempdir().expect("temporary directory");
    let data = root.path().join("data");
    fs::create_dir_all(data.join("sub")).expect("create data/sub");
    fs::write(data.join("sub/file.txt"), b"confined").expect("write fixture file");
    symlink("/", data.join("escape")).expect("create escape link");
    symlink("../", data.join("up")).expect("create up link");
    let data_dir = utf8(&data);
    (root, data_dir)
}

#[test]
fn read_link_distinguishes_links_files_and_absences() {
    let (_root, data) = fixture();
    let host = HostFs::new();

    assert_eq!(host.read_link(&format!("{data}/escape")), Ok(String::from("/")));
    assert_eq!(
        host.read_link(&format!("{data}/sub/file.txt")),
        Err(FsError::NotASymlink)
    );
    assert_eq!(
        host.read_link(&format!("{data}/absent")),
        Err(FsError::NotFound)
    );
}

#[test]
fn the_probe_canonicalises_and_requires_a_directory() {
    let (_root, data) = fixture();
    let host = HostFs::new();

    let canonical = fs::canonicalize(&data).expect("fixture directory exists");
    assert_eq!(host.canonical_dir(&data), Ok(utf8(&canonical)));
    assert_eq!(
        host.canonical_dir(&format!("{data}/sub/file.txt")),
        Err(FsError::InvalidArgument)
    );
    assert_eq!(
        host.canonical_dir(&format!("{data}/absent")),
        Err(FsError::NotFound)
    );
}

#[test]
fn escape_links_stay_inside_the_mount() {
    let (_root, data) = fixture();
    let host = HostFs::new();
    let mut mounts = MountTable::new();
    add_mount_spec(&mut mounts, &host, &format!("{data}:/:rw")).expect("register the mount");
    let view = SandboxFs::new(&mounts, &host);

    // The absolute target `/` is interpreted virtually, so the walk
    // restarts at the mount root rather than the host root.
    assert_eq!(
        canonicalise(&view, "/escape/sub/file.txt"),
        Ok(String::from("/sub/file.txt"))
    );

    // A component that only exists on the host side of the root stays
    // unreachable: the lookup happens under the mount and finds nothing.
    assert_eq!(canonicalise(&view, "/escape/etc/passwd"), Err(FsError::NotFound));

    // Walking up from the mount root clamps instead of leaving it.
    assert_eq!(
        canonicalise(&view, "/up/up/sub/file.txt"),
        Ok(String::from("/sub/file.txt"))
    );

    // The link itself may still be named without following it.
    assert_eq!(
        canonicalise_with(&view, "/escape", LinkPolicy::KeepFinal),
        Ok(String::from("/escape"))
    );
}

#[test]
fn link_cycles_on_disk_terminate() {
    let (_root, data) = fixture();
    symlink("cycle_b", format!("{data}/cycle_a")).expect("create cycle_a");
    symlink("cycle_a", format!("{data}/cycle_b")).expect("create cycle_b");
    let host = HostFs::new();
    let mut mounts = MountTable::new();
    add_mount_spec(&mut mounts, &host, &format!("{data}:/:rw")).expect("register the mount");
    let view = SandboxFs::new(&mounts, &host);

    assert_eq!(canonicalise(&view, "/cycle_a"), Err(FsError::TooManyLinks));
}

#[test]
fn guest_paths_translate_end_to_end() {
    let (_root, data) = fixture();
    let host = HostFs::new();
    let mut mounts = MountTable::new();
    add_mount_spec(&mut mounts, &host, &format!("{data}:/:ro")).expect("register the mount");
    let view = SandboxFs::new(&mounts, &host);
    let canonical_data = utf8(&fs::canonicalize(&data).expect("fixture directory exists"));

    let guest = StaticGuest::holding(0x100, "/sub/file.txt");
    let copied = copy_host_path_from_guest(
        &guest,
        &view,
        0x100,
        4096,
        false,
        LinkPolicy::FollowFinal,
    )
    .expect("reads are permitted on a read-only mount");
    assert_eq!(copied.as_str(), format!("{canonical_data}/sub/file.txt"));
    assert_eq!(fs::read(copied.as_str()).expect("read through the host path"), b"confined");

    assert_eq!(
        copy_host_path_from_guest(&guest, &view, 0x100, 4096, true, LinkPolicy::FollowFinal),
        Err(FsError::AccessDenied)
    );
    assert_eq!(
        copy_host_path_from_guest(&guest, &view, 0x200, 4096, false, LinkPolicy::FollowFinal),
        Err(FsError::BadAddress)
    );
}
