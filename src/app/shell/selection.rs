use std::collections::HashSet;

use types::{entities::user::User, Fid};

/// Accounts chosen for unfollowing.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Selection {
  pub targets: Vec<Fid>,
  /// Requested FIDs that are not non-followers.
  pub skipped: Vec<Fid>,
}

impl Selection {
  pub fn everyone(ghosts: &[User]) -> Self {
    Self {
      targets: ghosts.iter().map(|u| u.fid).collect(),
      skipped: Vec::new(),
    }
  }

  /// Keeps `requested` in order, dropping repeats.
  pub fn pick(ghosts: &[User], requested: &[Fid]) -> Self {
    let candidates: HashSet<Fid> = ghosts.iter().map(|u| u.fid).collect();
    let mut seen = HashSet::new();
    let mut selection = Self::default();
    for &fid in requested {
      if !seen.insert(fid) {
        continue;
      }
      if candidates.contains(&fid) {
        selection.targets.push(fid);
      } else {
        selection.skipped.push(fid);
      }
    }
    selection
  }
}
