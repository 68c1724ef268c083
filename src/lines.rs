use std::io::BufRead;

use crate::error::Result;

/// Calls `f` with the 1-based number and text of every line in `reader`.
///
/// Lines end at `\n`, `\r\n` or a lone `\r`. Invalid UTF-8 is replaced
/// rather than rejected.
pub(crate) fn for_each_line<R, F>(reader: R, mut f: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(usize, &str) -> Result<()>,
{
    let mut number = 0;
    for chunk in reader.split(b'\n') {
        let chunk = chunk?;
        let text = String::from_utf8_lossy(&chunk);
        let text = text.strip_suffix('\r').unwrap_or(&*text);
        for line in text.split('\r') {
            number += 1;
            f(number, line)?;
        }
    }
    Ok(())
}
