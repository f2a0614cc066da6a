use std::{cell::RefCell, collections::HashMap, rc::Rc};

/// The grid-shaped resource the interpreter reads and writes.
///
/// Rows and columns are 1-indexed. Reads outside the current bounds (or at
/// row/column 0) return the empty string, never an error; writes outside the
/// bounds grow the table, with newly created cells initialized empty.
pub trait Table {
    /// Reads a cell's text. Out-of-range positions read as `""`.
    fn get_cell(&self, row: usize, col: usize) -> String;
    /// Writes a cell's text, growing the table as needed.
    fn set_cell(&mut self, row: usize, col: usize, value: &str);
    /// Number of rows.
    fn row_count(&self) -> usize;
    /// Number of columns.
    fn col_count(&self) -> usize;
    /// Inserts an empty row at the 1-indexed position, or appends when the
    /// position is `None`. Callers validate the position.
    fn insert_row(&mut self, pos: Option<usize>);
    /// Deletes the row at the 1-indexed position. Callers validate.
    fn delete_row(&mut self, pos: usize);
    /// Inserts an empty column at the 1-indexed position across all rows.
    /// Callers validate.
    fn insert_column(&mut self, pos: usize);
    /// Rearranges rows to the given 0-indexed permutation.
    fn reorder_rows(&mut self, order: &[usize]);
}

/// A shared handle to a table; the interpreter holds one of these while a
/// table is selected.
pub type TableHandle = Rc<RefCell<dyn Table>>;

/// Resolves table ids for the `chọn_bảng` statement.
pub trait TableStore {
    /// Resolves a table id to a handle, or `None` when no such table exists.
    fn resolve(&self, id: &str) -> Option<TableHandle>;
}

/// A plain in-memory [`Table`].
///
/// Rows are kept rectangular: growing any cell pads every row to the new
/// width, so `col_count` reflects the widest write so far.
#[derive(Debug, Default)]
pub struct MemoryTable {
    rows:  Vec<Vec<String>>,
    width: usize,
}

impl MemoryTable {
    /// Creates an empty 0×0 table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table from rows of cell text, padded to a uniform width.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut table = Self { rows, width };
        table.pad();
        table
    }

    fn pad(&mut self) {
        for row in &mut self.rows {
            while row.len() < self.width {
                row.push(String::new());
            }
        }
    }
}

impl Table for MemoryTable {
    fn get_cell(&self, row: usize, col: usize) -> String {
        if row == 0 || col == 0 {
            return String::new();
        }
        self.rows
            .get(row - 1)
            .and_then(|cells| cells.get(col - 1))
            .cloned()
            .unwrap_or_default()
    }

    fn set_cell(&mut self, row: usize, col: usize, value: &str) {
        if row == 0 || col == 0 {
            return;
        }
        while self.rows.len() < row {
            self.rows.push(vec![String::new(); self.width]);
        }
        if col > self.width {
            self.width = col;
        }
        self.pad();
        self.rows[row - 1][col - 1] = value.to_string();
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn col_count(&self) -> usize {
        self.width
    }

    fn insert_row(&mut self, pos: Option<usize>) {
        let row = vec![String::new(); self.width];
        match pos {
            Some(p) if p >= 1 && p <= self.rows.len() + 1 => self.rows.insert(p - 1, row),
            Some(_) => {},
            None => self.rows.push(row),
        }
    }

    fn delete_row(&mut self, pos: usize) {
        if pos >= 1 && pos <= self.rows.len() {
            self.rows.remove(pos - 1);
        }
    }

    fn insert_column(&mut self, pos: usize) {
        if pos < 1 || pos > self.width + 1 {
            return;
        }
        self.width += 1;
        for row in &mut self.rows {
            row.insert(pos - 1, String::new());
        }
    }

    fn reorder_rows(&mut self, order: &[usize]) {
        self.rows = order.iter()
                         .filter_map(|&index| self.rows.get(index).cloned())
                         .collect();
    }
}

/// An in-memory collection of named tables.
///
/// The strict form ([`Workbook::new`]) only resolves tables added up front;
/// the auto-creating form ([`Workbook::auto_create`]) materializes an empty
/// table for any id on first use, which is what the CLI runs with.
#[derive(Default)]
pub struct Workbook {
    tables:         RefCell<HashMap<String, TableHandle>>,
    create_missing: bool,
}

impl Workbook {
    /// Creates an empty workbook that resolves only known table ids.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a workbook that materializes tables on first resolution.
    #[must_use]
    pub fn auto_create() -> Self {
        Self { tables:         RefCell::new(HashMap::new()),
               create_missing: true, }
    }

    /// Adds an empty table under the given id and returns its handle.
    pub fn add_table(&self, id: &str) -> TableHandle {
        let handle: TableHandle = Rc::new(RefCell::new(MemoryTable::new()));
        self.tables
            .borrow_mut()
            .insert(id.to_string(), Rc::clone(&handle));
        handle
    }

    /// Returns the handle of an existing table, for direct host-side access.
    #[must_use]
    pub fn table(&self, id: &str) -> Option<TableHandle> {
        self.tables.borrow().get(id).map(Rc::clone)
    }
}

impl TableStore for Workbook {
    fn resolve(&self, id: &str) -> Option<TableHandle> {
        if let Some(handle) = self.tables.borrow().get(id) {
            return Some(Rc::clone(handle));
        }
        if self.create_missing {
            return Some(self.add_table(id));
        }
        None
    }
}
