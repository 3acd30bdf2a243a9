use crate::{DataSet, SqlWriter};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRef {
    pub name: &'static str,
    pub schema: &'static str,
    pub alias: &'static str,
}

impl TableRef {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            schema: "",
            alias: "",
        }
    }

    pub fn full_name(&self) -> String {
        let mut result = String::new();
        if !self.alias.is_empty() {
            result.push_str(self.alias);
        } else {
            if !self.schema.is_empty() {
                result.push_str(self.schema);
                result.push('.');
            }
            result.push_str(self.name);
        }
        result
    }
}

impl DataSet for TableRef {
    fn qualified_columns(&self) -> bool {
        false
    }
    fn write_query(&self, writer: &dyn SqlWriter, out: &mut String) {
        writer.write_table_ref(out, self);
    }
}
