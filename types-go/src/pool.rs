use parking_lot::Mutex;
use std::fmt;
use std::ops::Deref;
use std::ops::DerefMut;

/// Pool of reusable render buffers. A guard owns its buffer for the duration
/// of one rendering; dropping it clears the buffer and returns it to the
/// pool.
#[derive(Debug, Default)]
pub(crate) struct BufPool {
  free: Mutex<Vec<String>>,
}

impl BufPool {
  pub fn get(&self) -> BufGuard<'_> {
    let buf = self.free.lock().pop().unwrap_or_default();
    BufGuard { pool: self, buf: Some(buf) }
  }
}

pub(crate) struct BufGuard<'a> {
  pool: &'a BufPool,
  // Only None during drop.
  buf: Option<String>,
}

impl Deref for BufGuard<'_> {
  type Target = String;

  fn deref(&self) -> &String {
    self.buf.as_ref().expect("pooled buffer taken")
  }
}

impl DerefMut for BufGuard<'_> {
  fn deref_mut(&mut self) -> &mut String {
    self.buf.as_mut().expect("pooled buffer taken")
  }
}

impl Drop for BufGuard<'_> {
  fn drop(&mut self) {
    if let Some(mut buf) = self.buf.take() {
      buf.clear();
      self.pool.free.lock().push(buf);
    }
  }
}

impl fmt::Debug for BufGuard<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("BufGuard").field("buf", &self.buf).finish()
  }
}
