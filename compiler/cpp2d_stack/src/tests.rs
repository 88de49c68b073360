use super::*;

/// Shape of the renderer's recursion: every level appends to a shared buffer.
fn render_nested(depth: u32, out: &mut String) {
    ensure_sufficient_stack(|| {
        if depth == 0 {
            out.push('x');
        } else {
            out.push('(');
            render_nested(depth - 1, out);
            out.push(')');
        }
    });
}

#[test]
fn shallow_nesting_renders() {
    let mut out = String::new();
    render_nested(3, &mut out);
    assert_eq!(out, "(((x)))");
}

#[test]
fn deep_nesting_does_not_overflow() {
    let mut out = String::new();
    render_nested(200_000, &mut out);
    assert_eq!(out.len(), 400_001);
    assert!(out.starts_with("(((("));
    assert!(out.ends_with("x))))"));
}

#[test]
fn closure_result_is_returned() {
    let result: Result<&str, ()> = ensure_sufficient_stack(|| Ok("done"));
    assert_eq!(result, Ok("done"));
}
