//! Clipboard backend selection per platform

/// An external helper and the arguments that make it read stdin into the clipboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipboardTool {
    pub program: &'static str,
    pub args: &'static [&'static str],
}

pub const PBCOPY: ClipboardTool = ClipboardTool {
    program: "pbcopy",
    args: &[],
};

pub const XCLIP: ClipboardTool = ClipboardTool {
    program: "xclip",
    args: &["-selection", "clipboard"],
};

pub const XSEL: ClipboardTool = ClipboardTool {
    program: "xsel",
    args: &["--clipboard", "--input"],
};

/// How text reaches the clipboard on a platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardBackend {
    /// Always the same system utility
    Fixed(ClipboardTool),
    /// The first of two helpers found on `PATH`, in preference order
    Probing([ClipboardTool; 2]),
    /// No clipboard delivery on this platform
    Unsupported { platform: String },
}

impl ClipboardBackend {
    /// Select the backend for a platform identifier such as `std::env::consts::OS`
    pub fn for_platform(platform: &str) -> Self {
        match platform {
            "macos" => Self::Fixed(PBCOPY),
            "linux" => Self::Probing([XCLIP, XSEL]),
            other => Self::Unsupported {
                platform: other.to_string(),
            },
        }
    }

    /// Tools this backend may use, in preference order
    pub fn candidates(&self) -> &[ClipboardTool] {
        match self {
            Self::Fixed(tool) => std::slice::from_ref(tool),
            Self::Probing(tools) => tools.as_slice(),
            Self::Unsupported { .. } => &[],
        }
    }
}
