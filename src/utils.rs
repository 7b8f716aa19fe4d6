/// Split text into `(line_number, line)` pairs, 1-based, skipping empty lines.
/// A trailing `\r` is dropped so CRLF files behave like LF files.
pub fn non_empty_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split('\n')
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.strip_suffix('\r').unwrap_or(line)))
        .filter(|(_, line)| !line.is_empty())
}

/// Data rows: like `non_empty_lines`, but a bare `\r`, U+2028 or U+2029 also
/// ends a row, so `"a\rb"` is two rows. Rows split this way share the line
/// number of the `\n`-terminated line they came from.
pub fn data_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split('\n').enumerate().flat_map(|(idx, line)| {
        line.split(['\r', '\u{2028}', '\u{2029}'])
            .filter(|part| !part.is_empty())
            .map(move |part| (idx + 1, part))
    })
}

/// Take `width` characters starting at character `start`, clamped to the end
/// of `row`. Never panics: a start past the end yields `""`.
pub fn slice_chars(row: &str, start: usize, width: usize) -> &str {
    let mut bounds = row
        .char_indices()
        .map(|(byte, _)| byte)
        .chain(std::iter::once(row.len()))
        .skip(start);
    let Some(begin) = bounds.next() else {
        return "";
    };
    if width == 0 {
        return "";
    }
    let end = bounds.nth(width - 1).unwrap_or(row.len());
    &row[begin..end]
}
