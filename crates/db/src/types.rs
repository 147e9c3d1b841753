/// Row counts touched by one `write_results` transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteStats {
    pub files_removed: usize,
    pub files_written: usize,
    pub usage_rows_written: usize,
}
