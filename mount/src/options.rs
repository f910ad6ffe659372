use nix::mount::MsFlags;

enum Word {
    Set(MsFlags),
    Clear(MsFlags),
    Propagation(MsFlags),
}

fn word(option: &str) -> Option<Word> {
    let word = match option {
        "defaults" => Word::Clear(MsFlags::empty()),
        "ro" => Word::Set(MsFlags::MS_RDONLY),
        "rw" => Word::Clear(MsFlags::MS_RDONLY),
        "suid" => Word::Clear(MsFlags::MS_NOSUID),
        "nosuid" => Word::Set(MsFlags::MS_NOSUID),
        "dev" => Word::Clear(MsFlags::MS_NODEV),
        "nodev" => Word::Set(MsFlags::MS_NODEV),
        "exec" => Word::Clear(MsFlags::MS_NOEXEC),
        "noexec" => Word::Set(MsFlags::MS_NOEXEC),
        "sync" => Word::Set(MsFlags::MS_SYNCHRONOUS),
        "async" => Word::Clear(MsFlags::MS_SYNCHRONOUS),
        "dirsync" => Word::Set(MsFlags::MS_DIRSYNC),
        "remount" => Word::Set(MsFlags::MS_REMOUNT),
        "mand" => Word::Set(MsFlags::MS_MANDLOCK),
        "nomand" => Word::Clear(MsFlags::MS_MANDLOCK),
        "atime" => Word::Clear(MsFlags::MS_NOATIME),
        "noatime" => Word::Set(MsFlags::MS_NOATIME),
        "diratime" => Word::Clear(MsFlags::MS_NODIRATIME),
        "nodiratime" => Word::Set(MsFlags::MS_NODIRATIME),
        "bind" => Word::Set(MsFlags::MS_BIND),
        "rbind" => Word::Set(MsFlags::MS_BIND | MsFlags::MS_REC),
        "relatime" => Word::Set(MsFlags::MS_RELATIME),
        "norelatime" => Word::Clear(MsFlags::MS_RELATIME),
        "strictatime" => Word::Set(MsFlags::MS_STRICTATIME),
        "nostrictatime" => Word::Clear(MsFlags::MS_STRICTATIME),
        "silent" => Word::Set(MsFlags::MS_SILENT),
        "loud" => Word::Clear(MsFlags::MS_SILENT),
        "private" => Word::Propagation(MsFlags::MS_PRIVATE),
        "rprivate" => Word::Propagation(MsFlags::MS_PRIVATE | MsFlags::MS_REC),
        "shared" => Word::Propagation(MsFlags::MS_SHARED),
        "rshared" => Word::Propagation(MsFlags::MS_SHARED | MsFlags::MS_REC),
        "slave" => Word::Propagation(MsFlags::MS_SLAVE),
        "rslave" => Word::Propagation(MsFlags::MS_SLAVE | MsFlags::MS_REC),
        "unbindable" => Word::Propagation(MsFlags::MS_UNBINDABLE),
        "runbindable" => Word::Propagation(MsFlags::MS_UNBINDABLE | MsFlags::MS_REC),
        _ => return None,
    };
    Some(word)
}

/// A mount option string split into kernel flags and filesystem data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountOptions {
    /// Flags for the initial `mount(2)` call.
    pub flags: MsFlags,
    /// Propagation change applied by a second call, empty if none was requested.
    pub propagation: MsFlags,
    /// Unrecognised words, passed through to the filesystem driver.
    pub data: String,
}

impl MountOptions {
    /// Parses a comma-separated option string such as `"ro,nosuid,size=64m"`.
    ///
    /// Words are applied left to right, so `"ro,rw"` ends up read-write.
    pub fn parse(options: &str) -> Self {
        let mut flags = MsFlags::empty();
        let mut propagation = MsFlags::empty();
        let mut data = Vec::new();

        for option in options.split(',').filter(|o| !o.is_empty()) {
            match word(option) {
                Some(Word::Set(f)) => flags |= f,
                Some(Word::Clear(f)) => flags &= !f,
                Some(Word::Propagation(f)) => propagation |= f,
                None => data.push(option),
            }
        }

        Self {
            flags,
            propagation,
            data: data.join(","),
        }
    }

    pub fn is_remount(&self) -> bool {
        self.flags.contains(MsFlags::MS_REMOUNT)
    }

    /// Bind mounts ignore `MS_RDONLY` on the first call and need a remount.
    pub fn is_readonly_bind(&self) -> bool {
        self.flags.contains(MsFlags::MS_BIND | MsFlags::MS_RDONLY)
    }

    /// Flags for the propagation change call.
    pub fn propagation_flags(&self) -> MsFlags {
        self.propagation | (self.flags & (MsFlags::MS_REC | MsFlags::MS_SILENT))
    }
}
