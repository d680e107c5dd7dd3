use indicatif::{ProgressBar, ProgressStyle};

#[must_use]
pub fn get_bar(len: u64) -> ProgressBar {
  let bar = ProgressBar::new(len);
  bar.set_style(ProgressStyle::default_bar().template(
    "[{elapsed_precise}] {bar} {pos:>5} / {len:>5} repos {eta_precise} {msg}",
  ));
  bar
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn bar_tracks_repos() {
    let bar = get_bar(7);
    assert_eq!(bar.length(), 7);
    assert_eq!(bar.position(), 0);
    bar.set_message("a/b");
    bar.inc(1);
    assert_eq!(bar.position(), 1);
    bar.finish_and_clear();
  }
}
