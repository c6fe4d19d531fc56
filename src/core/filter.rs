use sqlx::{Postgres, QueryBuilder};

/// One recognized filter predicate.
///
/// Column names come from the caller's fixed allow-list, never from request
/// input; only the value side is bound at execution time.
#[derive(Debug)]
pub enum Filter<'a> {
    Int(&'static str, i32),
    Text(&'static str, &'a str),
}

/// Append `WHERE <col> = $n AND <col> = $n ...` to a base SELECT, one
/// predicate per present filter. With no filters the base statement is left
/// unchanged.
pub fn push_filters<'a>(builder: &mut QueryBuilder<'a, Postgres>, filters: Vec<Filter<'a>>) {
    let mut separator = " WHERE ";
    for filter in filters {
        match filter {
            Filter::Int(column, value) => {
                builder.push(separator).push(column).push(" = ").push_bind(value);
            }
            Filter::Text(column, value) => {
                builder.push(separator).push(column).push(" = ").push_bind(value);
            }
        }
        separator = " AND ";
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "SELECT id, first_name FROM app_users";

    #[test]
    fn no_filters_leaves_base_statement_unchanged() {
        let mut builder = QueryBuilder::new(BASE);
        push_filters(&mut builder, Vec::new());
        assert_eq!(builder.sql(), BASE);
    }

    #[test]
    fn single_filter_appends_where_clause() {
        let mut builder = QueryBuilder::new(BASE);
        push_filters(&mut builder, vec![Filter::Text("role", "admin")]);
        assert_eq!(
            builder.sql(),
            "SELECT id, first_name FROM app_users WHERE role = $1"
        );
    }

    #[test]
    fn multiple_filters_are_and_combined_with_sequential_params() {
        let mut builder = QueryBuilder::new(BASE);
        push_filters(
            &mut builder,
            vec![
                Filter::Int("id", 7),
                Filter::Text("first_name", "Ada"),
                Filter::Text("role", "admin"),
            ],
        );
        assert_eq!(
            builder.sql(),
            "SELECT id, first_name FROM app_users \
             WHERE id = $1 AND first_name = $2 AND role = $3"
        );
    }
}
