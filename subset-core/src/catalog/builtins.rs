use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    process::Command,
};

use regex::Regex;

use crate::environment::prelude::{Value, ValueType};

use super::{Builtin, BuiltinError, BuiltinFn, BuiltinResult};

const I: ValueType = ValueType::Integer;
const D: ValueType = ValueType::Double;
const T: ValueType = ValueType::Text;
const B: ValueType = ValueType::Boolean;

const fn builtin(
    name: &'static str,
    params: &'static [ValueType],
    func: BuiltinFn,
) -> Builtin {
    Builtin { name, params, func }
}

pub static STANDARD: &[Builtin] = &[
    // Strings
    builtin("concat", &[T, T], concat),
    builtin("len", &[T], len),
    builtin("toUpperCase", &[T], to_upper_case),
    builtin("toLowerCase", &[T], to_lower_case),
    builtin("replace", &[T, T, T], replace),
    builtin("charAt", &[T, I], char_at),
    builtin("equals", &[T, T], equals),
    builtin("equalsIgnoreCase", &[T, T], equals_ignore_case),
    builtin("contains", &[T, T], contains),
    builtin("startsWith", &[T, T], starts_with),
    builtin("endsWith", &[T, T], ends_with),
    builtin("split", &[T, T], split),
    builtin("toString", &[I], to_string),
    builtin("toString", &[D], to_string),
    builtin("toString", &[T], to_string),
    builtin("toString", &[B], to_string),
    builtin("reverseString", &[T], reverse_string),
    // Math
    builtin("add", &[I, I], add),
    builtin("subtract", &[I, I], subtract),
    builtin("multiply", &[I, I], multiply),
    builtin("divide", &[I, I], divide),
    builtin("modulus", &[I, I], modulus),
    builtin("max", &[I, I], max),
    builtin("min", &[I, I], min),
    builtin("power", &[D, D], power),
    builtin("absoluteValue", &[D], absolute_value),
    builtin("round", &[D], round),
    builtin("floor", &[D], floor),
    builtin("ceil", &[D], ceil),
    builtin("log", &[D], log),
    builtin("sqrt", &[D], sqrt),
    builtin("cbrt", &[D], cbrt),
    builtin("sin", &[D], sin),
    builtin("cos", &[D], cos),
    builtin("tan", &[D], tan),
    // Files
    builtin("exists", &[T], exists),
    builtin("readFile", &[T], read_file),
    builtin("fileWriter", &[T, T], file_writer),
    builtin("openFile", &[T], open_file),
    builtin("closeFile", &[], close_file),
    builtin("isEmpty", &[T], is_empty),
    builtin("fileLength", &[T], file_length),
    builtin("listFiles", &[T], list_files),
    // System
    builtin("getProperty", &[T], get_property),
    builtin("setReadable", &[T, B], set_readable),
    builtin("setWritable", &[T, B], set_writable),
    builtin("availableProcessors", &[], available_processors),
    builtin("destroy", &[], destroy),
];

fn text(args: &[Value], index: usize) -> Result<&str, BuiltinError> {
    match args.get(index) {
        Some(Value::Text { value }) => Ok(value),
        _ => Err(BuiltinError::ArgumentType { index, expected: T }),
    }
}

fn int(args: &[Value], index: usize) -> Result<i64, BuiltinError> {
    match args.get(index) {
        Some(Value::Integer { value }) => Ok(*value),
        _ => Err(BuiltinError::ArgumentType { index, expected: I }),
    }
}

fn double(args: &[Value], index: usize) -> Result<f64, BuiltinError> {
    match args.get(index) {
        Some(Value::Double { value }) => Ok(*value),
        _ => Err(BuiltinError::ArgumentType { index, expected: D }),
    }
}

fn boolean(args: &[Value], index: usize) -> Result<bool, BuiltinError> {
    match args.get(index) {
        Some(Value::Boolean { value }) => Ok(*value),
        _ => Err(BuiltinError::ArgumentType { index, expected: B }),
    }
}

fn ok(value: impl Into<Value>) -> BuiltinResult {
    Ok(Some(value.into()))
}

fn io_error(path: &str) -> impl FnOnce(std::io::Error) -> BuiltinError + '_ {
    move |source| BuiltinError::Io { path: path.to_string(), source }
}

fn render_list<S: AsRef<str>>(items: &[S]) -> String {
    let items = items.iter()
        .map(|item| item.as_ref())
        .collect::<Vec<&str>>()
        .join(", ");

    format!("[{items}]")
}

fn concat(args: &[Value]) -> BuiltinResult {
    ok(format!("{}{}", text(args, 0)?, text(args, 1)?))
}

fn len(args: &[Value]) -> BuiltinResult {
    ok(text(args, 0)?.chars().count() as i64)
}

fn to_upper_case(args: &[Value]) -> BuiltinResult {
    ok(text(args, 0)?.to_uppercase())
}

fn to_lower_case(args: &[Value]) -> BuiltinResult {
    ok(text(args, 0)?.to_lowercase())
}

fn replace(args: &[Value]) -> BuiltinResult {
    ok(text(args, 0)?.replace(text(args, 1)?, text(args, 2)?))
}

fn char_at(args: &[Value]) -> BuiltinResult {
    let chars = text(args, 0)?.chars().collect::<Vec<char>>();
    let index = int(args, 1)?;

    usize::try_from(index)
        .ok()
        .and_then(|idx| chars.get(idx))
        .map(|ch| Some(Value::text(ch.to_string())))
        .ok_or(BuiltinError::IndexOutOfBounds { index, length: chars.len() })
}

fn equals(args: &[Value]) -> BuiltinResult {
    ok(text(args, 0)? == text(args, 1)?)
}

fn equals_ignore_case(args: &[Value]) -> BuiltinResult {
    ok(text(args, 0)?.to_lowercase() == text(args, 1)?.to_lowercase())
}

fn contains(args: &[Value]) -> BuiltinResult {
    ok(text(args, 0)?.contains(text(args, 1)?))
}

fn starts_with(args: &[Value]) -> BuiltinResult {
    ok(text(args, 0)?.starts_with(text(args, 1)?))
}

fn ends_with(args: &[Value]) -> BuiltinResult {
    ok(text(args, 0)?.ends_with(text(args, 1)?))
}

/// Splits around regex matches. Trailing empty pieces are dropped unless the
/// input itself is empty.
fn split(args: &[Value]) -> BuiltinResult {
    let input = text(args, 0)?;
    let pattern = Regex::new(text(args, 1)?)?;

    if input.is_empty() {
        return ok(render_list(&[input]));
    }

    let mut parts = pattern.split(input).collect::<Vec<&str>>();

    while parts.last().is_some_and(|part| part.is_empty()) {
        parts.pop();
    }

    ok(render_list(&parts))
}

fn to_string(args: &[Value]) -> BuiltinResult {
    ok(args.first().map(Value::to_string).unwrap_or_default())
}

fn reverse_string(args: &[Value]) -> BuiltinResult {
    ok(text(args, 0)?.chars().rev().collect::<String>())
}

fn add(args: &[Value]) -> BuiltinResult {
    int(args, 0)?.checked_add(int(args, 1)?)
        .map(|value| Some(Value::from(value)))
        .ok_or(BuiltinError::Overflow)
}

fn subtract(args: &[Value]) -> BuiltinResult {
    int(args, 0)?.checked_sub(int(args, 1)?)
        .map(|value| Some(Value::from(value)))
        .ok_or(BuiltinError::Overflow)
}

fn multiply(args: &[Value]) -> BuiltinResult {
    int(args, 0)?.checked_mul(int(args, 1)?)
        .map(|value| Some(Value::from(value)))
        .ok_or(BuiltinError::Overflow)
}

/// Never fails: `0/0` is NaN and any other division by zero is Infinity.
fn divide(args: &[Value]) -> BuiltinResult {
    let (a, b) = (int(args, 0)?, int(args, 1)?);

    let value = match (a, b) {
        (0, 0) => f64::NAN,
        (_, 0) => f64::INFINITY,
        (a, b) => a as f64 / b as f64,
    };

    ok(value)
}

fn modulus(args: &[Value]) -> BuiltinResult {
    let (a, b) = (int(args, 0)?, int(args, 1)?);

    if b == 0 {
        return Err(BuiltinError::DivisionByZero);
    }

    a.checked_rem(b)
        .map(|value| Some(Value::from(value)))
        .ok_or(BuiltinError::Overflow)
}

fn max(args: &[Value]) -> BuiltinResult {
    ok(int(args, 0)?.max(int(args, 1)?))
}

fn min(args: &[Value]) -> BuiltinResult {
    ok(int(args, 0)?.min(int(args, 1)?))
}

fn power(args: &[Value]) -> BuiltinResult {
    ok(double(args, 0)?.powf(double(args, 1)?))
}

fn absolute_value(args: &[Value]) -> BuiltinResult {
    ok(double(args, 0)?.abs())
}

/// Rounds half up, and NaN to zero.
fn round(args: &[Value]) -> BuiltinResult {
    let value = double(args, 0)?;

    ok(if value.is_nan() { 0.0 } else { (value + 0.5).floor() })
}

fn floor(args: &[Value]) -> BuiltinResult {
    ok(double(args, 0)?.floor())
}

fn ceil(args: &[Value]) -> BuiltinResult {
    ok(double(args, 0)?.ceil())
}

fn log(args: &[Value]) -> BuiltinResult {
    ok(double(args, 0)?.ln())
}

fn sqrt(args: &[Value]) -> BuiltinResult {
    ok(double(args, 0)?.sqrt())
}

fn cbrt(args: &[Value]) -> BuiltinResult {
    ok(double(args, 0)?.cbrt())
}

fn sin(args: &[Value]) -> BuiltinResult {
    ok(double(args, 0)?.sin())
}

fn cos(args: &[Value]) -> BuiltinResult {
    ok(double(args, 0)?.cos())
}

fn tan(args: &[Value]) -> BuiltinResult {
    ok(double(args, 0)?.tan())
}

fn exists(args: &[Value]) -> BuiltinResult {
    ok(Path::new(text(args, 0)?).exists())
}

/// Reads the file line by line; every line, the last included, ends with `\n`.
fn read_file(args: &[Value]) -> BuiltinResult {
    let path = text(args, 0)?;
    let file = File::open(path).map_err(io_error(path))?;

    let mut content = String::new();

    for line in BufReader::new(file).lines() {
        content.push_str(&line.map_err(io_error(path))?);
        content.push('\n');
    }

    ok(content)
}

fn file_writer(args: &[Value]) -> BuiltinResult {
    let path = text(args, 0)?;

    std::fs::write(path, text(args, 1)?).map_err(io_error(path))?;

    Ok(None)
}

fn open_file(args: &[Value]) -> BuiltinResult {
    let path = text(args, 0)?;

    let mut command = if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    } else if cfg!(target_os = "macos") {
        Command::new("open")
    } else {
        Command::new("xdg-open")
    };

    command.arg(path).spawn().map_err(io_error(path))?;

    Ok(None)
}

fn close_file(_args: &[Value]) -> BuiltinResult {
    Ok(None)
}

/// A missing file counts as empty.
fn is_empty(args: &[Value]) -> BuiltinResult {
    let length = std::fs::metadata(text(args, 0)?)
        .map(|metadata| metadata.len())
        .unwrap_or(0);

    ok(length == 0)
}

fn file_length(args: &[Value]) -> BuiltinResult {
    let length = std::fs::metadata(text(args, 0)?)
        .map(|metadata| metadata.len())
        .unwrap_or(0);

    i64::try_from(length)
        .map(|length| Some(Value::from(length)))
        .map_err(|_| BuiltinError::Overflow)
}

fn list_files(args: &[Value]) -> BuiltinResult {
    let Ok(entries) = std::fs::read_dir(text(args, 0)?) else {
        return Ok(None);
    };

    let mut names = entries
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect::<Vec<String>>();

    names.sort();

    ok(render_list(&names))
}

fn get_property(args: &[Value]) -> BuiltinResult {
    let env_var = |names: &[&str]| names.iter().find_map(|name| std::env::var(name).ok());

    let property = match text(args, 0)? {
        "os.name" => Some(std::env::consts::OS.to_string()),
        "os.arch" => Some(std::env::consts::ARCH.to_string()),
        "user.dir" => std::env::current_dir()
            .ok()
            .map(|dir| dir.display().to_string()),
        "user.home" => env_var(&["HOME", "USERPROFILE"]),
        "user.name" => env_var(&["USER", "USERNAME"]),
        "java.io.tmpdir" => Some(std::env::temp_dir().display().to_string()),
        "line.separator" => Some(if cfg!(windows) { "\r\n" } else { "\n" }.to_string()),
        "file.separator" => Some(std::path::MAIN_SEPARATOR.to_string()),
        "path.separator" => Some(if cfg!(windows) { ";" } else { ":" }.to_string()),
        _ => None,
    };

    Ok(property.map(Value::from))
}

#[cfg(unix)]
fn set_owner_permission(path: &str, bit: u32, enabled: bool) -> Result<(), BuiltinError> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = std::fs::metadata(path).map_err(io_error(path))?.permissions();
    let mode = permissions.mode();

    permissions.set_mode(if enabled { mode | bit } else { mode & !bit });

    std::fs::set_permissions(path, permissions).map_err(io_error(path))
}

fn set_readable(args: &[Value]) -> BuiltinResult {
    let (path, readable) = (text(args, 0)?, boolean(args, 1)?);

    #[cfg(unix)]
    set_owner_permission(path, 0o400, readable)?;

    // Files cannot be made unreadable elsewhere.
    #[cfg(not(unix))]
    let _ = (path, readable);

    Ok(None)
}

fn set_writable(args: &[Value]) -> BuiltinResult {
    let (path, writable) = (text(args, 0)?, boolean(args, 1)?);

    #[cfg(unix)]
    set_owner_permission(path, 0o200, writable)?;

    #[cfg(not(unix))]
    {
        let mut permissions = std::fs::metadata(path).map_err(io_error(path))?.permissions();
        permissions.set_readonly(!writable);
        std::fs::set_permissions(path, permissions).map_err(io_error(path))?;
    }

    Ok(None)
}

fn available_processors(_args: &[Value]) -> BuiltinResult {
    let count = std::thread::available_parallelism()
        .map(|count| count.get())
        .unwrap_or(1);

    ok(count as i64)
}

fn destroy(_args: &[Value]) -> BuiltinResult {
    tracing::info!("destroy() called, terminating the process");

    std::process::exit(0)
}
