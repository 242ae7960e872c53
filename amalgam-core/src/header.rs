use chrono::NaiveDate;

use crate::contract::LibraryMetadata;

/// Marks the artifact safe for repeated inclusion.
pub const INCLUDE_GUARD: &str = "#pragma once";

/// Date format used in the `date:` field of the header.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Renders the include guard and metadata comment block, followed by a blank line.
pub fn render_header(metadata: &LibraryMetadata, date: NaiveDate) -> String {
    format!(
        "{INCLUDE_GUARD}\n\
         \n\
         /*\n\
         \n\
         === {title} ===\n\
         \n\
         --- Details ---\n\
         \n\
         version: {version}\n\
         date:    {date}\n\
         author:  {author}\n\
         \n\
         */\n\
         \n",
        title = metadata.title,
        version = metadata.version,
        date = date.format(DATE_FORMAT),
        author = metadata.author,
    )
}
