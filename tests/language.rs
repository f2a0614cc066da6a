use std::{collections::VecDeque, fs};

use datable::{
    interpreter::{
        host::Host,
        lexer::{Token, lex},
        range::parse_a1,
        table::{Table, TableStore, Workbook},
        value::Value,
    },
    run,
};
use walkdir::WalkDir;

/// A recording host: collects everything shown and answers prompts from a
/// scripted queue.
struct TestHost {
    shown:   Vec<String>,
    answers: VecDeque<String>,
}

impl TestHost {
    fn new() -> Self {
        Self { shown:   Vec::new(),
               answers: VecDeque::new(), }
    }

    fn with_answers(answers: &[&str]) -> Self {
        Self { shown:   Vec::new(),
               answers: answers.iter().map(|s| (*s).to_string()).collect(), }
    }
}

impl Host for TestHost {
    fn show(&mut self, message: &str) {
        self.shown.push(message.to_string());
    }

    fn ask(&mut self, _prompt: &str) -> Option<String> {
        self.answers.pop_front()
    }
}

/// Runs a script against an auto-creating workbook, returning the result
/// and everything the script displayed.
fn run_script(source: &str) -> (Result<Option<Value>, String>, Vec<String>) {
    let workbook = Workbook::auto_create();
    let mut host = TestHost::new();
    let result = run(source, &workbook, &mut host).map_err(|e| e.to_string());
    (result, host.shown)
}

fn assert_success(source: &str) {
    let (result, _) = run_script(source);
    if let Err(e) = result {
        panic!("Script failed: {e}");
    }
}

fn assert_failure(source: &str) -> String {
    let (result, _) = run_script(source);
    match result {
        Ok(_) => panic!("Script succeeded but was expected to fail"),
        Err(e) => e,
    }
}

fn displayed(source: &str) -> Vec<String> {
    let (result, shown) = run_script(source);
    if let Err(e) = result {
        panic!("Script failed: {e}");
    }
    shown
}

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, code) in extract_dsl_blocks(&content).into_iter().enumerate() {
            count += 1;
            let (result, _) = run_script(&code);
            if let Err(e) = result {
                panic!("DSL example {} in {:?} failed:\n{}\nError: {}",
                       i + 1,
                       path,
                       code,
                       e);
            }
        }
    }

    assert!(count > 0, "No DSL examples found in book/src");
}

fn extract_dsl_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```datable") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

#[test]
fn example_works() {
    let contents = fs::read_to_string("tests/example.datable").expect("missing file");
    assert_success(&contents);
}

#[test]
fn assignment_and_basic_arithmetic() {
    assert_eq!(displayed("x = 5\nx = x + 3\nhiển_thị x"), ["8"]);
    assert_eq!(displayed("x = 7 * 9\nhiển_thị x"), ["63"]);
    assert_eq!(displayed("x = 10 / 4\nhiển_thị x"), ["2.5"]);
    assert_eq!(displayed("x = 7 % 4\nhiển_thị x"), ["3"]);
    assert_eq!(displayed("hiển_thị -3 + 1"), ["-2"]);
}

#[test]
fn gan_statement_and_cell_assignment() {
    assert_eq!(displayed("chọn_bảng 't1'\ngán ô(1, 1), 'hello'\nhiển_thị ô(1, 1)"),
               ["hello"]);
    assert_eq!(displayed("chọn_bảng 't1'\nô(2, 3) = 'xin chào'\nhiển_thị ô(2, 3)"),
               ["xin chào"]);
    assert_eq!(displayed("gán x, 12\nhiển_thị x"), ["12"]);
}

#[test]
fn string_coercion_semantics() {
    // `+` concatenates unless both operands are numbers; Null acts as ""
    assert_eq!(displayed("hiển_thị 'a' + 1"), ["a1"]);
    assert_eq!(displayed("hiển_thị không_có + 5"), ["5"]);
    // equality is textual
    assert_eq!(displayed("hiển_thị 1 == '1'"), ["true"]);
    assert_eq!(displayed("hiển_thị 'x' != 'y'"), ["true"]);
    // ordering is numeric
    assert_eq!(displayed("hiển_thị '10' > '9'"), ["true"]);
    // subtraction coerces non-numeric operands to 0
    assert_eq!(displayed("hiển_thị 'abc' - 1"), ["-1"]);
}

#[test]
fn for_loop_counts_up_inclusively() {
    assert_eq!(displayed("lặp i từ 1 đến 3:\n    hiển_thị i"), ["1", "2", "3"]);
    // zero iterations when start exceeds end; loop variable untouched
    assert_eq!(displayed("i = 9\nlặp i từ 5 đến 1:\n    hiển_thị i\nhiển_thị i"),
               ["9"]);
    // bounds truncate toward zero
    assert_eq!(displayed("lặp i từ 1.9 đến 2.9:\n    hiển_thị i"), ["1", "2"]);
    // the loop variable keeps its final value
    assert_eq!(displayed("lặp i từ 1 đến 3:\n    x = 0\nhiển_thị i"), ["3"]);
}

#[test]
fn if_elseif_else_chain() {
    assert_eq!(displayed("nếu 1 > 2:\n    hiển_thị 'a'\nkhác:\n    hiển_thị 'b'"),
               ["b"]);

    let script = r"
điểm = 7
nếu điểm >= 9:
    hiển_thị 'giỏi'
khác_nếu điểm >= 7:
    hiển_thị 'khá'
khác_nếu điểm >= 5:
    hiển_thị 'trung bình'
khác:
    hiển_thị 'yếu'
";
    assert_eq!(displayed(script), ["khá"]);

    // nếu_không is a synonym for khác_nếu
    assert_eq!(displayed("nếu 0:\n    hiển_thị 'a'\nnếu_không 1:\n    hiển_thị 'b'"),
               ["b"]);
    // single-line inline body form
    assert_eq!(displayed("nếu 1: hiển_thị 'ok'"), ["ok"]);
}

#[test]
fn misplaced_else_clause_is_a_parse_error() {
    assert_failure("khác:\n    hiển_thị 'x'");
    assert_failure("khác_nếu 1:\n    hiển_thị 'x'");
}

#[test]
fn functions_use_dynamic_scope_with_frame_restore() {
    // nothing a function writes to an existing name survives the call
    let script = r"
x = 10
hàm f(y):
    x = x + y
    trả_về x
kết_quả = f(5)
hiển_thị kết_quả
hiển_thị x
";
    assert_eq!(displayed(script), ["15", "10"]);

    // missing arguments bind to Null
    assert_eq!(displayed("hàm g(a, b):\n    trả_về a + b\nhiển_thị g('x')"),
               ["x"]);

    // trả_về unwinds through nested loops to the call boundary
    let script = r"
hàm tìm_đầu:
    lặp i từ 1 đến 10:
        lặp j từ 1 đến 10:
            nếu i * j == 6:
                trả_về i * 10 + j
trả_lời = tìm_đầu()
hiển_thị trả_lời
";
    assert_eq!(displayed(script), ["16"]);
}

#[test]
fn skip_continues_the_enclosing_loop() {
    let script = r"
lặp i từ 1 đến 5:
    nếu i % 2 == 0:
        bỏ_qua
    hiển_thị i
";
    assert_eq!(displayed(script), ["1", "3", "5"]);

    // a top-level bỏ_qua is discarded, not an error
    let (result, _) = run_script("bỏ_qua");
    assert_eq!(result, Ok(None));
}

#[test]
fn logical_operators_short_circuit_and_return_operands() {
    // the right side must not run when the left decides
    assert_eq!(displayed("x = 0\ny = 5 hoặc (x = 9)\nhiển_thị x"), ["0"]);
    assert_eq!(displayed("x = 0\ny = 0 và (x = 9)\nhiển_thị x"), ["0"]);
    // operand values, not booleans
    assert_eq!(displayed("hiển_thị 0 hoặc 'mặc_định'"), ["mặc_định"]);
    assert_eq!(displayed("hiển_thị 1 và 2"), ["2"]);
    assert_eq!(displayed("hiển_thị không 0"), ["true"]);
}

#[test]
fn assignment_is_an_expression() {
    assert_eq!(displayed("y = (x = 5) + 1\nhiển_thị x\nhiển_thị y"), ["5", "6"]);
    assert!(assert_failure("gán 5, 3").contains("assignment target"));
}

#[test]
fn arrays_and_indexing() {
    assert_eq!(displayed("m = [1, 2, 3]\nhiển_thị m[0]\nhiển_thị m[2]"), ["1", "3"]);
    assert_eq!(displayed("m = [[1, 2], [3, 4]]\nhiển_thị m[1][0]"), ["3"]);
    assert_eq!(displayed("m = [1, 2]\nm[1] = 9\nhiển_thị m"), ["[1,9]"]);
    // out-of-range reads are Null, shown as "null"
    assert_eq!(displayed("m = [1]\nhiển_thị m[5]"), ["null"]);
    // out-of-bounds index assignment does not grow the array
    assert!(assert_failure("m = [1]\nm[5] = 2").contains("out of bounds"));
    assert!(assert_failure("x = 5\nx[0] = 1").contains("array or object"));
}

#[test]
fn objects_and_key_access() {
    let script = "đối = {'tên': 'An', 'tuổi': 20}\nhiển_thị đối['tên']\nhiển_thị đối";
    assert_eq!(displayed(script), ["An", r#"{"tên":"An","tuổi":20}"#]);
    // assigning a fresh key grows the object
    assert_eq!(displayed("đối = {}\nđối['a'] = 1\nhiển_thị đối['a']"), ["1"]);
    // aliases observe in-place mutation
    assert_eq!(displayed("a = {'x': 1}\nb = a\nb['x'] = 2\nhiển_thị a['x']"), ["2"]);
}

#[test]
fn callbacks_as_expression_strings_and_functions() {
    assert_eq!(displayed("m = [1, 2, 3]\nhiển_thị ánh_xạ(m, 'x * 2')"), ["[2,4,6]"]);
    assert_eq!(displayed("m = [1, 2, 3, 4]\nhiển_thị lọc(m, 'x % 2 == 0')"), ["[2,4]"]);
    assert_eq!(displayed("m = [1, 2, 3]\nhiển_thị gộp(m, 'total + current', 0)"),
               ["6"]);
    assert_eq!(displayed("m = [5, 8, 2]\nhiển_thị tìm(m, 'x > 6')"), ["8"]);
    assert_eq!(displayed("m = [1, 3]\nhiển_thị một_số(m, 'x > 2')"), ["true"]);
    assert_eq!(displayed("m = [1, 3]\nhiển_thị mọi(m, 'x > 2')"), ["false"]);

    let script = r"
hàm nhân_đôi(x):
    trả_về x * 2
m = [1, 2, 3]
hiển_thị ánh_xạ(m, nhân_đôi)
";
    assert_eq!(displayed(script), ["[2,4,6]"]);

    // a callback cannot leak writes into the enclosing frame
    assert_eq!(displayed("x = 7\nánh_xạ([1], 'x = 99')\nhiển_thị x"), ["7"]);
    assert!(assert_failure("ánh_xạ([1], 5)").contains("Callback"));
}

#[test]
fn array_library() {
    // default sort is by text form
    assert_eq!(displayed("hiển_thị sắp_xếp_mảng([10, 9, 2])"), ["[10,2,9]"]);

    let script = r"
hàm so_sánh(a, b):
    trả_về a - b
hiển_thị sắp_xếp_mảng([10, 9, 2], so_sánh)
";
    assert_eq!(displayed(script), ["[2,9,10]"]);

    assert_eq!(displayed("hiển_thị làm_phẳng([[1, [2]], [3]])"), ["[1,[2],3]"]);
    assert_eq!(displayed("hiển_thị làm_phẳng([[1, [2]], [3]], 2)"), ["[1,2,3]"]);
    assert_eq!(displayed("hiển_thị nối([1, 2], [3], 'bỏ')"), ["[1,2,3]"]);
    assert_eq!(displayed("hiển_thị cắt([1, 2, 3, 4], 1, 3)"), ["[2,3]"]);
    assert_eq!(displayed("hiển_thị cắt([1, 2, 3, 4], -2)"), ["[3,4]"]);
    assert_eq!(displayed("m = [2]\nthêm_vào_đầu(m, 0, 1)\nhiển_thị m"), ["[0,1,2]"]);
    assert_eq!(displayed("m = [1]\nthêm_vào_cuối(m, 2, 3)\nhiển_thị m"), ["[1,2,3]"]);
    assert_eq!(displayed("m = [1, 2]\nhiển_thị xóa_đầu(m)\nhiển_thị m"), ["1", "[2]"]);
    assert_eq!(displayed("m = [1, 2]\nhiển_thị xóa_cuối(m)\nhiển_thị m"), ["2", "[1]"]);
    assert_eq!(displayed("m = [1, 4]\nchèn(m, 1, 2, 3)\nhiển_thị m"), ["[1,2,3,4]"]);
    assert_eq!(displayed("m = [1, 2, 3, 4]\nhiển_thị xóa_vị_trí(m, 1, 2)\nhiển_thị m"),
               ["[2,3]", "[1,4]"]);
    assert_eq!(displayed("hiển_thị chứa([1, 2, 3], 2)"), ["true"]);
    assert_eq!(displayed("hiển_thị chứa([1, 2, 3], 2, 2)"), ["false"]);
    assert_eq!(displayed("hiển_thị vị_trí([5, 6, 7], 7)"), ["2"]);
    assert_eq!(displayed("hiển_thị vị_trí([5, 6], 8)"), ["-1"]);

    let script = r#"
người = [{'tên': 'An', 'lớp': 'A'}, {'tên': 'Bình', 'lớp': 'B'}, {'tên': 'Chi', 'lớp': 'A'}]
nhóm = nhóm_theo(người, 'lớp')
hiển_thị độ_dài(khóa(nhóm))
hiển_thị ánh_xạ(nhóm['A'], 'x["tên"]')
"#;
    assert_eq!(displayed(script), ["2", r#"["An","Chi"]"#]);
}

#[test]
fn recursive_array_search() {
    let script = "kết = tìm_kiếm([['táo', 'cam'], 'táo xanh'], 'táo')\nhiển_thị độ_dài(kết)\nhiển_thị kết[0]['path']";
    assert_eq!(displayed(script), ["2", "[0][0]"]);
    assert_eq!(displayed("hiển_thị độ_dài(tìm_kiếm(['táo', 'Táo'], 'táo', 1 == 1))"),
               ["2"]);
}

#[test]
fn json_library() {
    assert_eq!(displayed("hiển_thị json_chuỗi({'a': 1, 'b': [2, 3]})"),
               [r#"{"a":1,"b":[2,3]}"#]);
    assert_eq!(displayed("d = json_phân_tích('{\"a\": 5}')\nhiển_thị d['a']"), ["5"]);
    assert_eq!(displayed("hiển_thị json_phân_tích('not json')"), ["null"]);
    assert_eq!(displayed("hiển_thị là_json([1])\nhiển_thị là_json('x')"),
               ["true", "false"]);
    assert_eq!(displayed("hiển_thị là_chuỗi_json('[1, 2]')\nhiển_thị là_chuỗi_json('nope')"),
               ["true", "false"]);

    // deep clone detaches the copy
    let script = r"
gốc = {'a': [1, 2]}
bản = json_sao_chép(gốc)
bản['a'][0] = 9
hiển_thị gốc['a'][0]
";
    assert_eq!(displayed(script), ["1"]);

    let script = r"
d = {'hồ_sơ': {'tên': 'An'}}
hiển_thị lấy_đường_dẫn(d, 'hồ_sơ.tên')
đặt_đường_dẫn(d, 'hồ_sơ.tuổi', 20)
hiển_thị lấy_đường_dẫn(d, 'hồ_sơ.tuổi')
hiển_thị đặt_đường_dẫn('không phải', 'a.b', 1)
";
    assert_eq!(displayed(script), ["An", "20", "false"]);

    let script = "đ = {'a': 1, 'b': 2}\nhiển_thị khóa(đ)\nhiển_thị giá_trị(đ)\nhiển_thị mục(đ)";
    assert_eq!(displayed(script),
               [r#"["a","b"]"#, "[1,2]", r#"[["a",1],["b",2]]"#]);

    assert_eq!(displayed("đ = {'a': 1}\nhiển_thị có_khóa(đ, 'a')\nhiển_thị có_khóa(đ, 'b')"),
               ["true", "false"]);
    assert_eq!(displayed("hiển_thị có_giá_trị({'a': 1}, 1)"), ["true"]);
    assert_eq!(displayed("hiển_thị lọc_đối_tượng({'a': 1, 'b': 5}, 'value > 2')"),
               [r#"{"b":5}"#]);
    assert_eq!(displayed("hiển_thị ánh_xạ_đối_tượng({'a': 1, 'b': 2}, 'value * 10')"),
               [r#"{"a":10,"b":20}"#]);
}

#[test]
fn string_library() {
    assert_eq!(displayed("hiển_thị chia('a,b,c', ',')"), [r#"["a","b","c"]"#]);
    assert_eq!(displayed("hiển_thị chia('xin')"), [r#"["x","i","n"]"#]);
    assert_eq!(displayed("hiển_thị thay_thế('ba ba', 'ba', 'má')"), ["má má"]);
    assert_eq!(displayed("hiển_thị đếm('aaa', 'aa')"), ["1"]);
    assert_eq!(displayed("hiển_thị đếm('xin chào')"), ["8"]);
    assert_eq!(displayed("hiển_thị đếm([1, 2, 3])"), ["3"]);
    assert_eq!(displayed("hiển_thị độ_dài('chào')"), ["4"]);
    assert_eq!(displayed("hiển_thị số('12.5') + 1"), ["13.5"]);
    assert_eq!(displayed("hiển_thị số('abc')"), ["0"]);
}

#[test]
fn grid_library() {
    let script = r"
chọn_bảng 'điểm'
gán_ô(1, 1, 'Tên')
gán_ô(1, 2, 'Điểm')
gán_ô(2, 1, 'An')
gán_ô(2, 2, 8)
gán_ô(3, 1, 'Bình')
gán_ô(3, 2, 6)
hiển_thị số_hàng()
hiển_thị số_cột()
hiển_thị tổng(2)
";
    assert_eq!(displayed(script), ["3", "2", "14"]);

    // numeric sort of the data rows, ascending then descending
    let sort_header = r"
chọn_bảng 't'
gán_ô(1, 1, 'x')
gán_ô(2, 1, 10)
gán_ô(3, 1, 2)
gán_ô(4, 1, 9)
";
    let asc = format!("{sort_header}sắp_xếp(1, 1 == 1)\nhiển_thị vùng('A2:A4')");
    assert_eq!(displayed(&asc), [r#"["2","9","10"]"#]);
    let desc = format!("{sort_header}sắp_xếp(1, 0)\nhiển_thị vùng('A2:A4')");
    assert_eq!(displayed(&desc), [r#"["10","9","2"]"#]);

    let script = r"
chọn_bảng 't'
gán_ô(1, 1, 'a')
gán_ô(2, 1, 'b')
thêm_hàng(2)
hiển_thị ô(3, 1)
xóa_hàng(2)
hiển_thị ô(2, 1)
chèn_cột(1)
hiển_thị ô(1, 2)
";
    assert_eq!(displayed(script), ["b", "b", "a"]);

    assert!(assert_failure("chọn_bảng 't'\nxóa_hàng(5)").contains("out of bounds"));
}

#[test]
fn range_addressing() {
    let setup = r"
chọn_bảng 't'
gán_ô(1, 1, 1)
gán_ô(1, 2, 2)
gán_ô(2, 1, 3)
gán_ô(2, 2, 4)
";
    let script = format!("{setup}hiển_thị vùng('A1:B2')");
    assert_eq!(displayed(&script), [r#"[["1","2"],["3","4"]]"#]);

    // a single-column rectangle reads as a flat list
    let script = format!("{setup}hiển_thị vùng('A1:A2')");
    assert_eq!(displayed(&script), [r#"["1","3"]"#]);

    // scalar broadcast
    let script = "chọn_bảng 't'\nđặt_vùng('A1:B2', 7)\nhiển_thị vùng('A1:B2')";
    assert_eq!(displayed(script), [r#"[["7","7"],["7","7"]]"#]);

    // positional flat write truncates when the data runs out
    let script = "chọn_bảng 't'\nđặt_vùng('A1:B2', [1, 2, 3])\nhiển_thị vùng('A1:B2')";
    assert_eq!(displayed(script), [r#"[["1","2"],["3",""]]"#]);

    // nested rows write row by row
    let script = "chọn_bảng 't'\nđặt_vùng('A1:B2', [[1, 2], [3, 4]])\nhiển_thị ô(2, 2)";
    assert_eq!(displayed(script), ["4"]);

    let script = format!("{setup}sao_chep_vùng('A1:B2')\ndán_vùng('C3')\nhiển_thị vùng('C3:D4')");
    assert_eq!(displayed(&script), [r#"[["1","2"],["3","4"]]"#]);

    let script = format!("{setup}kẹp = sao_chep_vùng('A1:B1')\nhiển_thị kẹp['width']\ndán_vùng(3, 1)\nhiển_thị ô(3, 2)");
    assert_eq!(displayed(&script), ["2", "2"]);

    assert!(assert_failure("chọn_bảng 't'\nvùng('nope')").contains("Invalid cell or range"));
}

#[test]
fn a1_parsing() {
    let range = parse_a1("A1", 1).unwrap();
    assert_eq!((range.r1, range.c1, range.r2, range.c2), (1, 1, 1, 1));

    assert_eq!(parse_a1("AA1", 1).unwrap().c1, 27);
    assert_eq!(parse_a1("z9", 1).unwrap().c1, 26);

    // corners normalize in either order
    assert_eq!(parse_a1("B2:A1", 1).unwrap(), parse_a1("A1:B2", 1).unwrap());

    assert!(parse_a1("1A", 1).is_err());
    assert!(parse_a1("A", 1).is_err());
    assert!(parse_a1("A1:B2:C3", 1).is_err());
}

#[test]
fn grid_bounds_grow_on_write_and_read_empty() {
    let workbook = Workbook::new();
    let table = workbook.add_table("t");

    table.borrow_mut().set_cell(5, 5, "x");
    assert!(table.borrow().row_count() >= 5);
    assert!(table.borrow().col_count() >= 5);
    assert_eq!(table.borrow().get_cell(5, 5), "x");
    assert_eq!(table.borrow().get_cell(3, 3), "");

    assert_eq!(table.borrow().get_cell(0, 1), "");
    assert_eq!(table.borrow().get_cell(1, 0), "");
    assert_eq!(table.borrow().get_cell(99, 99), "");
}

#[test]
fn table_resolution_errors() {
    // a grid builtin before chọn_bảng names the missing selection
    let error = assert_failure("gán_ô(1, 1, 'x')");
    assert!(error.contains("chọn_bảng"), "unexpected error: {error}");

    // a strict workbook rejects unknown table ids
    let workbook = Workbook::new();
    let mut host = TestHost::new();
    let error = run("chọn_bảng 'không_có'", &workbook, &mut host).unwrap_err()
                                                                 .to_string();
    assert!(error.contains("không_có"), "unexpected error: {error}");

    // the auto-creating store materializes tables on demand
    assert!(Workbook::auto_create().resolve("mới").is_some());
}

#[test]
fn prompt_reads_scripted_answers() {
    let workbook = Workbook::auto_create();
    let mut host = TestHost::with_answers(&["An"]);
    run("tên = nhập('Tên bạn?')\nhiển_thị 'chào ' + tên",
        &workbook,
        &mut host).unwrap();
    assert_eq!(host.shown, ["chào An"]);

    // an exhausted queue answers Null
    let mut host = TestHost::new();
    run("hiển_thị nhập('gì?')", &Workbook::auto_create(), &mut host).unwrap();
    assert_eq!(host.shown, ["null"]);
}

#[test]
fn unknown_function_is_an_error() {
    assert!(assert_failure("hàm_lạ(1)").contains("hàm_lạ"));
}

#[test]
fn unknown_variable_reads_null() {
    assert_eq!(displayed("hiển_thị chưa_gán"), ["null"]);
}

#[test]
fn unicode_identifiers_and_comments() {
    let script = "số_lượng = 3 # đây là chú thích\ntổng_cộng = số_lượng * 2\nhiển_thị tổng_cộng";
    assert_eq!(displayed(script), ["6"]);
    // a comment strips even inside what looks like a string
    assert_eq!(displayed("x = 1\nhiển_thị x # hiển_thị 'bỏ # qua'"), ["1"]);
}

#[test]
fn indentation_structure_balances() {
    let script = r"
nếu 1:
    lặp i từ 1 đến 2:
        hiển_thị i
    hiển_thị 'xong'
khác:
    hiển_thị 'không'
";
    let tokens = lex(script).unwrap();
    let indents = tokens.iter().filter(|(t, _)| *t == Token::Indent).count();
    let dedents = tokens.iter().filter(|(t, _)| *t == Token::Dedent).count();
    assert_eq!(indents, dedents);
    assert!(indents > 0);

    // a dedent to a width matching no open level is an error
    assert!(lex("nếu 1:\n        x = 1\n    y = 2").is_err());
}

#[test]
fn lexer_edge_cases() {
    // escapes make the following character literal
    assert_eq!(displayed(r"hiển_thị 'it\'s'"), ["it's"]);
    // an unterminated quote consumes to end of line
    assert_eq!(displayed("hiển_thị 'dở dang"), ["dở dang"]);
    // a second decimal point starts a new token, which makes this a parse error
    assert_failure("x = 1.2.3");
    // unknown characters lex permissively but do not parse as statements
    assert_failure("@ = 1");
}

#[test]
fn program_result_values() {
    let (result, _) = run_script("x = 5\nx + 1");
    assert_eq!(result.unwrap().map(|v| v.to_number()), Some(6.0));

    // a top-level trả_về ends the program with its value
    let (result, _) = run_script("trả_về 42\nhiển_thị 'không chạy'");
    assert_eq!(result.unwrap().map(|v| v.to_number()), Some(42.0));
}
