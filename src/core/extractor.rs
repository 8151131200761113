use crate::utils::error::{Result, WatchError};
use scraper::{Html, Selector};

const TABLE_BODY: &str = "tbody";
const LIST_TABLE: &str = "table#list";
const STYLED_ROW: &str = "tr.row";

/// Where the counted rows were found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowCount {
    TableBody(u32),
    ListTable(u32),
    NotFound,
}

impl RowCount {
    pub fn count(self) -> u32 {
        match self {
            RowCount::TableBody(n) | RowCount::ListTable(n) => n,
            RowCount::NotFound => 0,
        }
    }
}

/// Result of looking at one source during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    Counted(RowCount),
    Unavailable { reason: String },
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| WatchError::ProcessingError {
        message: format!("invalid selector '{}': {}", css, e),
    })
}

/// html5ever wraps the rows of every table in a `tbody`, so only a tag written in the
/// source counts as a table body.
fn has_written_tbody(html: &str) -> bool {
    html.to_ascii_lowercase().contains("<tbody")
}

/// Count `tr.row` elements under the first `tbody`, or under `table#list` when the
/// document has no table body.
pub fn count_rows(html: &str) -> Result<RowCount> {
    let document = Html::parse_document(html);
    let rows = selector(STYLED_ROW)?;

    if has_written_tbody(html) {
        if let Some(body) = document.select(&selector(TABLE_BODY)?).next() {
            let count = body.select(&rows).count();
            tracing::debug!("   {} styled rows under tbody", count);
            return Ok(RowCount::TableBody(count as u32));
        }
    }

    if let Some(table) = document.select(&selector(LIST_TABLE)?).next() {
        let count = table.select(&rows).count();
        tracing::debug!("   {} styled rows under table#list", count);
        return Ok(RowCount::ListTable(count as u32));
    }

    Ok(RowCount::NotFound)
}

/// Turn a fetch result into an observation. Nothing here returns an error.
pub fn observe(fetched: Result<String>) -> Observation {
    let html = match fetched {
        Ok(html) => html,
        Err(e) => {
            return Observation::Unavailable {
                reason: e.to_string(),
            }
        }
    };

    match count_rows(&html) {
        Ok(count) => Observation::Counted(count),
        Err(e) => Observation::Unavailable {
            reason: e.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with_rows(styled: usize, plain: usize) -> String {
        let mut rows = String::new();
        for i in 0..styled {
            rows.push_str(&format!("<tr class=\"row\"><td>Duyuru {}</td></tr>", i));
        }
        for i in 0..plain {
            rows.push_str(&format!("<tr class=\"header\"><td>Başlık {}</td></tr>", i));
        }
        format!(
            "<html><body><table id=\"list\"><tbody>{}</tbody></table></body></html>",
            rows
        )
    }

    #[test]
    fn test_counts_styled_rows_in_table_body() {
        for n in [0, 1, 7, 25] {
            let html = page_with_rows(n, 3);
            assert_eq!(count_rows(&html).unwrap(), RowCount::TableBody(n as u32));
        }
    }

    #[test]
    fn test_row_marker_matches_class_token() {
        let html = r#"<table><tbody>
            <tr class="row odd"><td>a</td></tr>
            <tr class="row even"><td>b</td></tr>
            <tr class="rowspan"><td>c</td></tr>
        </tbody></table>"#;
        assert_eq!(count_rows(html).unwrap().count(), 2);
    }

    #[test]
    fn test_only_first_table_body_is_counted() {
        let html = r#"<table><tbody><tr class="row"><td>1</td></tr></tbody></table>
            <table><tbody><tr class="row"><td>2</td></tr><tr class="row"><td>3</td></tr></tbody></table>"#;
        assert_eq!(count_rows(html).unwrap(), RowCount::TableBody(1));
    }

    #[test]
    fn test_list_table_without_body_tag_is_counted() {
        let html = r#"<table><tr><td>nav</td></tr></table>
            <table id="list">
                <tr><th>Başlık</th></tr>
                <tr class="row"><td>Duyuru 1</td></tr>
                <TR class="row"><td>Duyuru 2</td></TR>
            </table>"#;
        assert_eq!(count_rows(html).unwrap(), RowCount::ListTable(2));
    }

    #[test]
    fn test_written_body_tag_is_matched_case_insensitively() {
        let html = r#"<table><TBODY><tr class="row"><td>1</td></tr></TBODY></table>
            <table id="list"><tr class="row"><td>2</td></tr></table>"#;
        assert_eq!(count_rows(html).unwrap(), RowCount::TableBody(1));
    }

    #[test]
    fn test_table_without_body_tag_or_list_id_counts_zero() {
        let html = r#"<table><tr class="row"><td>1</td></tr></table>"#;
        assert_eq!(count_rows(html).unwrap(), RowCount::NotFound);
    }

    #[test]
    fn test_page_without_table_counts_zero() {
        let html = "<html><body><div class=\"row\">not a table</div></body></html>";
        let count = count_rows(html).unwrap();
        assert_eq!(count, RowCount::NotFound);
        assert_eq!(count.count(), 0);
    }

    #[test]
    fn test_fetch_failure_is_unavailable_not_zero() {
        let failed = observe(Err(WatchError::ProcessingError {
            message: "connection reset".to_string(),
        }));
        assert!(matches!(failed, Observation::Unavailable { .. }));

        let empty = observe(Ok("<p>nothing</p>".to_string()));
        assert_eq!(empty, Observation::Counted(RowCount::NotFound));
    }
}
