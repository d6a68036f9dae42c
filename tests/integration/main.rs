// 統合テストのエントリーポイント

mod test_end_to_end;
mod test_error_handling;
mod test_main_entry_point;
mod test_ordering;
