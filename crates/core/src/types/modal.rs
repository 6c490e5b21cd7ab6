//! Open/closed state of the contact modal.
//!
//! Several entry points (header button, hero button, mobile menu) open the
//! same dialog. They all write through one [`ContactModal`] cell; the form
//! inside the dialog has its own state in
//! [`SubmissionView`](super::view::SubmissionView).

use core::fmt;
use std::str::FromStr;

/// The modal's visibility. Starts closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContactModal {
    open: bool,
}

impl ContactModal {
    #[must_use]
    pub const fn closed() -> Self {
        Self { open: false }
    }

    #[must_use]
    pub const fn is_open(self) -> bool {
        self.open
    }

    pub const fn open(&mut self) {
        self.open = true;
    }

    pub const fn close(&mut self) {
        self.open = false;
    }

    pub const fn toggle(&mut self) {
        self.open = !self.open;
    }
}

impl fmt::Display for ContactModal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.open { "open" } else { "closed" })
    }
}

impl FromStr for ContactModal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self { open: true }),
            "closed" | "" => Ok(Self::closed()),
            other => Err(format!("unknown modal state: {other}")),
        }
    }
}
