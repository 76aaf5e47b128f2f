// Schema extractor: finds the INSERT header(s) for one table and reads the
// declared column list. Headers whose column list carries NOT NULL / DEFAULT
// are table-definition text, not data insertion, and are skipped.

use crate::error::ExtractError;
use crate::parser::ColumnSchema;
use regex::Regex;

// Column schema plus the byte offset just past `VALUES` for every INSERT
// statement of the table, in dump order.
#[derive(Debug, Clone)]
pub struct InsertHeaders {
    pub schema: ColumnSchema,
    pub values_offsets: Vec<usize>,
}

pub struct SchemaParser {
    table: String,
    header_re: Regex,
    constraint_re: Regex,
    quoted_ident_re: Regex,
}

impl SchemaParser {
    // Build regexes once for the target table.
    pub fn new(table: &str) -> Self {
        let header_re = Regex::new(&format!(
            r#"(?s)(?i:INSERT\s+INTO)\s+(?:[`"]?[^`"\s.(]+[`"]?\.)?[`"]?{}[`"]?\s*\((.*?)\)\s*(?i:VALUES)"#,
            regex::escape(table)
        ))
        .expect("valid insert header regex");
        let constraint_re =
            Regex::new(r"(?i)\bNOT\s+NULL\b|\bDEFAULT\b").expect("valid constraint regex");
        let quoted_ident_re =
            Regex::new(r#"`[^`]*`|"[^"]*""#).expect("valid quoted identifier regex");
        Self {
            table: table.to_string(),
            header_re,
            constraint_re,
            quoted_ident_re,
        }
    }

    pub fn extract(&self, text: &str) -> Result<InsertHeaders, ExtractError> {
        let mut schema: Option<ColumnSchema> = None;
        let mut values_offsets = Vec::new();
        let mut candidates = 0usize;

        for cap in self.header_re.captures_iter(text) {
            let (Some(whole), Some(list)) = (cap.get(0), cap.get(1)) else {
                continue;
            };
            candidates += 1;
            if self.has_constraint_markers(list.as_str()) {
                tracing::debug!(
                    offset = whole.start(),
                    "ExtractSchema: skipping header with constraint markers"
                );
                continue;
            }

            let columns = parse_column_list(list.as_str());
            match &schema {
                None => {
                    tracing::debug!(
                        table = %self.table,
                        columns = columns.len(),
                        offset = whole.start(),
                        "ExtractSchema: found INSERT header"
                    );
                    schema = Some(ColumnSchema::new(columns));
                    values_offsets.push(whole.end());
                }
                Some(first) if first.columns() == columns.as_slice() => {
                    values_offsets.push(whole.end());
                }
                Some(_) => {
                    tracing::warn!(
                        table = %self.table,
                        offset = whole.start(),
                        "INSERT header declares a different column list; its rows are skipped"
                    );
                }
            }
        }

        tracing::debug!(
            candidates,
            statements = values_offsets.len(),
            "ExtractSchema: header scan finished"
        );

        match schema {
            Some(schema) => Ok(InsertHeaders {
                schema,
                values_offsets,
            }),
            None => Err(ExtractError::SchemaNotFound {
                table: self.table.clone(),
            }),
        }
    }

    // Quoted identifiers are column names, never constraint keywords.
    fn has_constraint_markers(&self, list: &str) -> bool {
        let bare = self.quoted_ident_re.replace_all(list, "");
        self.constraint_re.is_match(&bare)
    }
}

// Split a header column list, stripping whitespace and identifier quotes.
pub fn parse_column_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|col| col.trim().trim_matches(['`', '"', '\''].as_ref()).trim())
        .filter(|col| !col.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DUMP: &str = "\
CREATE TABLE `devices` (
  `did` int(11) NOT NULL,
  `fname` varchar(255) DEFAULT NULL
);
INSERT INTO `devices` (`did`, `fname`, `vds`) VALUES
(1,'a',10),
(2,'b',20);
";

    #[test]
    fn reads_backtick_quoted_columns() {
        let headers = SchemaParser::new("devices").extract(DUMP).unwrap();
        assert_eq!(headers.schema.columns(), &["did", "fname", "vds"]);
        assert_eq!(headers.values_offsets.len(), 1);
        assert!(DUMP[headers.values_offsets[0]..].trim_start().starts_with("(1,"));
    }

    #[test]
    fn skips_candidates_with_constraint_markers() {
        let dump = "\
INSERT INTO `devices` (`did` int NOT NULL, `fname` varchar(10) DEFAULT '') VALUES (0,'x');
INSERT INTO `devices` (`did`, `fname`) VALUES (1,'a');
";
        let headers = SchemaParser::new("devices").extract(dump).unwrap();
        assert_eq!(headers.schema.columns(), &["did", "fname"]);
        assert_eq!(headers.values_offsets.len(), 1);
    }

    #[test]
    fn quoted_keyword_column_names_are_not_constraints() {
        let dump = r#"INSERT INTO `devices` (`did`, `default`, "Not Null") VALUES (1,2,3);"#;
        let headers = SchemaParser::new("devices").extract(dump).unwrap();
        assert_eq!(headers.schema.columns(), &["did", "default", "Not Null"]);
        assert_eq!(headers.values_offsets.len(), 1);
    }

    #[test]
    fn table_name_is_case_sensitive_but_keywords_are_not() {
        let dump = "\
insert into DEVICES (did) values (9);
insert into devices (did) values (1);
";
        let headers = SchemaParser::new("devices").extract(dump).unwrap();
        assert_eq!(headers.values_offsets.len(), 1);
        assert!(dump[headers.values_offsets[0]..].trim_start().starts_with("(1)"));
    }

    #[test]
    fn collects_every_statement_for_the_table() {
        let dump = "\
INSERT INTO devices (did, fname) VALUES (1,'a');
INSERT INTO other (did, fname) VALUES (9,'z');
INSERT INTO devices (did, fname) VALUES (2,'b');
";
        let headers = SchemaParser::new("devices").extract(dump).unwrap();
        assert_eq!(headers.values_offsets.len(), 2);
    }

    #[test]
    fn schema_qualified_and_double_quoted_names() {
        let dump = r#"INSERT INTO "shop"."devices" ("did", "vds") VALUES (1,2);"#;
        let headers = SchemaParser::new("devices").extract(dump).unwrap();
        assert_eq!(headers.schema.columns(), &["did", "vds"]);
    }

    #[test]
    fn table_name_must_match_exactly() {
        let dump = "INSERT INTO `devices_old` (`did`) VALUES (1);";
        let err = SchemaParser::new("devices").extract(dump).unwrap_err();
        assert!(matches!(err, ExtractError::SchemaNotFound { ref table } if table == "devices"));
    }

    #[test]
    fn missing_header_is_schema_not_found() {
        let err = SchemaParser::new("devices").extract(DUMP.split("INSERT").next().unwrap());
        assert!(matches!(err, Err(ExtractError::SchemaNotFound { .. })));
    }

    #[test]
    fn column_list_trims_quotes_and_whitespace() {
        assert_eq!(
            parse_column_list(" `did` ,\n\"fname\", 'vds' ,"),
            vec!["did", "fname", "vds"]
        );
    }
}
