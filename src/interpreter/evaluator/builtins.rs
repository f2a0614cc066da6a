use crate::interpreter::{
    evaluator::core::{EvalResult, Runtime},
    value::Value,
};

/// Array-processing builtins (`ánh_xạ`, `lọc`, `gộp`, …).
pub mod array;
/// Grid builtins (`ô`, `gán_ô`, `sắp_xếp`, `tổng`, …).
pub mod grid;
/// Object and JSON builtins (`json_chuỗi`, `khóa`, `lấy_đường_dẫn`, …).
pub mod object;
/// A1-range builtins (`vùng`, `đặt_vùng`, copy/paste).
pub mod ranges;
/// String builtins (`chia`, `thay_thế`, `đếm`).
pub mod text;

/// Type alias for builtin function handlers.
///
/// A builtin receives the runtime, the already-evaluated argument values,
/// and the call's line number. Builtins validate argument shapes loosely:
/// missing arguments default and extra arguments are ignored.
type BuiltinFn = for<'a> fn(&mut Runtime<'a>, Vec<Value>, usize) -> EvalResult<Value>;

/// Defines builtin functions by generating a lookup table.
///
/// Each entry maps a surface name to a handler function. The macro produces
/// `BuiltinDef` (internal metadata) and `BUILTIN_TABLE` (static table used
/// by [`lookup`]).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => $func:expr
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name: &'static str,
            func: BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, func: $func },
            )*
        ];
    };
}

builtin_functions! {
    // grid
    "ô"             => grid::cell,
    "gán_ô"         => grid::assign_cell,
    "số_hàng"       => grid::row_count,
    "số_cột"        => grid::col_count,
    "thêm_hàng"     => grid::insert_row,
    "xóa_hàng"      => grid::delete_row,
    "chèn_cột"      => grid::insert_column,
    "sắp_xếp"       => grid::sort_rows,
    "tổng"          => grid::column_sum,
    // ranges
    "vùng"          => ranges::read_range,
    "đặt_vùng"      => ranges::write_range,
    "sao_chep_vùng" => ranges::copy_range,
    "dán_vùng"      => ranges::paste_range,
    // array
    "ánh_xạ"        => array::map,
    "lọc"           => array::filter,
    "gộp"           => array::reduce,
    "tìm"           => array::find,
    "một_số"        => array::some,
    "mọi"           => array::every,
    "sắp_xếp_mảng"  => array::sort,
    "làm_phẳng"     => array::flatten,
    "nhóm_theo"     => array::group_by,
    "nối"           => array::concat,
    "cắt"           => array::slice,
    "thêm_vào_đầu"  => array::push_front,
    "thêm_vào_cuối" => array::push_back,
    "xóa_đầu"       => array::pop_front,
    "xóa_cuối"      => array::pop_back,
    "chèn"          => array::insert_at,
    "xóa_vị_trí"    => array::remove_at,
    "chứa"          => array::contains,
    "vị_trí"        => array::index_of,
    "tìm_kiếm"      => array::search,
    // object / JSON
    "json_chuỗi"        => object::stringify,
    "json_phân_tích"    => object::parse,
    "json_sao_chép"     => object::clone_deep,
    "là_json"           => object::is_json,
    "là_chuỗi_json"     => object::is_json_text,
    "lấy_đường_dẫn"     => object::get_path,
    "đặt_đường_dẫn"     => object::set_path,
    "lọc_đối_tượng"     => object::filter_object,
    "ánh_xạ_đối_tượng"  => object::map_object,
    "khóa"              => object::keys,
    "giá_trị"           => object::values,
    "mục"               => object::entries,
    "có_khóa"           => object::has_key,
    "có_giá_trị"        => object::has_value,
    // string
    "chia"          => text::split,
    "thay_thế"      => text::replace,
    "đếm"           => text::count,
    // I/O and misc
    "hiển_thị"      => show,
    "nhập"          => prompt,
    "số"            => to_number,
    "độ_dài"        => length,
}

/// Looks up a builtin handler by exact name.
pub(crate) fn lookup(name: &str) -> Option<BuiltinFn> {
    BUILTIN_TABLE.iter()
                 .find(|builtin| builtin.name == name)
                 .map(|builtin| builtin.func)
}

/// Returns the builtin's argument at `index`, defaulting to Null.
pub(crate) fn arg(args: &[Value], index: usize) -> Value {
    args.get(index).cloned().unwrap_or(Value::Null)
}

/// `hiển_thị(value)`: displays a value through the host. Arrays and
/// objects render as JSON, everything else via its text form.
fn show(rt: &mut Runtime, args: Vec<Value>, _line: usize) -> EvalResult<Value> {
    let message = arg(&args, 0).to_message();
    rt.host.show(&message);
    Ok(Value::Null)
}

/// `nhập(prompt)`: prompts the host for a line of input; Null when no
/// input is available.
fn prompt(rt: &mut Runtime, args: Vec<Value>, _line: usize) -> EvalResult<Value> {
    let prompt_text = match args.first() {
        None | Some(Value::Null) => String::new(),
        Some(value) => value.text(),
    };
    Ok(rt.host
         .ask(&prompt_text)
         .map_or(Value::Null, Value::Str))
}

/// `số(value)`: numeric coercion (non-numeric values become 0).
fn to_number(_rt: &mut Runtime, args: Vec<Value>, _line: usize) -> EvalResult<Value> {
    Ok(Value::Number(arg(&args, 0).to_number()))
}

/// `độ_dài(value)`: array length or string character count; 0 for
/// everything else.
fn length(_rt: &mut Runtime, args: Vec<Value>, _line: usize) -> EvalResult<Value> {
    let len = match args.first() {
        Some(Value::Array(items)) => items.borrow().len(),
        Some(Value::Str(s)) => s.chars().count(),
        _ => 0,
    };
    Ok(Value::Number(len as f64))
}
