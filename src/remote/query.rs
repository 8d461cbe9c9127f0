//! Postgrest filter builder: `?col=eq.value&order=col.asc&limit=n`.

use std::fmt::Display;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    select: Option<String>,
    filters: Vec<(String, String)>,
    order: Vec<String>,
    limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.select = Some(columns.to_string());
        self
    }

    fn filter(mut self, column: &str, op: &str, value: impl Display) -> Self {
        self.filters
            .push((column.to_string(), format!("{op}.{value}")));
        self
    }

    pub fn eq(self, column: &str, value: impl Display) -> Self {
        self.filter(column, "eq", value)
    }

    pub fn neq(self, column: &str, value: impl Display) -> Self {
        self.filter(column, "neq", value)
    }

    pub fn gte(self, column: &str, value: impl Display) -> Self {
        self.filter(column, "gte", value)
    }

    pub fn lte(self, column: &str, value: impl Display) -> Self {
        self.filter(column, "lte", value)
    }

    pub fn lt(self, column: &str, value: impl Display) -> Self {
        self.filter(column, "lt", value)
    }

    /// `col=in.(a,b,c)`
    pub fn in_list<T: Display>(self, column: &str, values: &[T]) -> Self {
        let joined = values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.filter(column, "in", format!("({joined})"))
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let dir = if ascending { "asc" } else { "desc" };
        self.order.push(format!("{column}.{dir}"));
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Key/value pairs ready for `RequestBuilder::query`.
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut out = Vec::with_capacity(self.filters.len() + 3);
        if let Some(s) = &self.select {
            out.push(("select".to_string(), s.clone()));
        }
        out.extend(self.filters.iter().cloned());
        if !self.order.is_empty() {
            out.push(("order".to_string(), self.order.join(",")));
        }
        if let Some(n) = self.limit {
            out.push(("limit".to_string(), n.to_string()));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(q: &Query) -> String {
        q.pairs()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    #[test]
    fn filters_keep_insertion_order() {
        let q = Query::new()
            .select("*")
            .eq("user_id", "u1")
            .gte("shift_date", "2025-03-01")
            .lte("shift_date", "2025-03-31")
            .order("shift_date", true)
            .order("start_time", true);
        assert_eq!(
            rendered(&q),
            "select=*&user_id=eq.u1&shift_date=gte.2025-03-01&shift_date=lte.2025-03-31\
             &order=shift_date.asc,start_time.asc"
        );
    }

    #[test]
    fn in_list_and_exclusion() {
        let q = Query::new()
            .in_list("shift_id", &["a", "b"])
            .neq("status", "missed")
            .limit(1);
        assert_eq!(
            rendered(&q),
            "shift_id=in.(a,b)&status=neq.missed&limit=1"
        );
    }
}
