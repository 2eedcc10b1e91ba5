//! Interactive Demo page: input form, live preview and CSV upload summary

use super::{Upload, ViewError, ViewNode};
use crate::data::describe::HEAD_ROWS;
use crate::data::{describe, DataTable, Description};
use crate::form::FormSubmission;
use crate::nav::RenderContext;

/// Where the demo form posts its fields
pub const FORM_ACTION: &str = "/demo/form";

/// Where the upload control posts its file
pub const UPLOAD_ACTION: &str = "/demo/upload";

const SNIPPET: &str = r#"
// Parse the form body and echo it back
let form = FormSubmission::from_pairs(parse_urlencoded(&body));
for line in form.preview() {
    nodes.push(ViewNode::field(line.label, line.value));
}
if let Some(message) = form.confirmation() {
    nodes.push(ViewNode::success(message));
}
"#;

pub fn build(
    ctx: &RenderContext,
    form: &FormSubmission,
    upload: Option<&Upload>,
) -> Result<Vec<ViewNode>, ViewError> {
    let mut form_column = vec![
        ViewNode::subheader("User Input Form"),
        ViewNode::Form {
            action: FORM_ACTION.to_string(),
            values: form.clone(),
        },
    ];
    if let Some(message) = form.confirmation() {
        form_column.push(ViewNode::success(message));
    }

    let mut preview_column = vec![ViewNode::subheader("Live Preview")];
    preview_column.extend(
        form.preview()
            .into_iter()
            .map(|line| ViewNode::field(line.label, line.value)),
    );

    let mut nodes = vec![
        ViewNode::header("🎮 Interactive Demo"),
        ViewNode::Columns {
            weights: vec![2, 1],
            columns: vec![form_column, preview_column],
        },
        ViewNode::Divider,
        ViewNode::subheader("File Upload Demo"),
        ViewNode::FileUpload {
            action: UPLOAD_ACTION.to_string(),
            label: "Choose a CSV file".to_string(),
            accept: ".csv,text/csv".to_string(),
        },
    ];

    if let Some(upload) = upload {
        let table = DataTable::from_csv_bytes(&upload.bytes)?;
        tracing::info!(
            file = %upload.filename,
            rows = table.row_count(),
            columns = table.column_count(),
            "Summarized upload"
        );

        nodes.push(ViewNode::text("File uploaded successfully!"));
        nodes.push(head_table(&table));

        let description = describe(&table);
        if description != Description::Empty {
            nodes.push(ViewNode::subheader("Basic Statistics"));
            nodes.push(stats_table(&description));
        }
    }

    if ctx.nav.show_code {
        nodes.push(ViewNode::code("rust", SNIPPET));
    }

    Ok(nodes)
}

fn head_table(table: &DataTable) -> ViewNode {
    let head = table.head(HEAD_ROWS);
    ViewNode::Table {
        columns: table.headers.clone(),
        index: (0..head.len()).map(|i| i.to_string()).collect(),
        rows: head
            .iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect(),
    }
}

fn stats_table(description: &Description) -> ViewNode {
    let (index, rows): (Vec<String>, Vec<Vec<String>>) = description
        .rows()
        .into_iter()
        .map(|(label, values)| (label.to_string(), values))
        .unzip();

    ViewNode::Table {
        columns: description.columns().into_iter().map(String::from).collect(),
        index,
        rows,
    }
}
