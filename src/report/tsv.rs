use crate::report::ExportRow;

/// Header taken from the first row; every row is expected to carry the
/// same field names in the same order.
pub fn render_tsv(rows: &[ExportRow]) -> String {
    let mut out = String::new();
    let Some(first) = rows.first() else {
        return out;
    };
    push_line(&mut out, first.names());
    for row in rows {
        push_line(&mut out, row.values());
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>) {
    let mut first = true;
    for cell in cells {
        if !first {
            out.push('\t');
        }
        first = false;
        out.push_str(&sanitize(cell));
    }
    out.push('\n');
}

fn sanitize(cell: &str) -> String {
    cell.replace(['\t', '\n', '\r'], " ")
}
