//! UI-related string formatting: addresses, timestamps and permission flags.

use chrono::Local;
use filevault::common::address::Address;
use filevault::common::permissions::Permissions;
use filevault::utils::time::parse_rfc3339_string;

/// 缩短地址用于提示符，例如 `0x1234…cdef`
pub fn short_address(address: &Address) -> String {
    let hex = address.to_hex();
    format!("{}…{}", &hex[..6], &hex[hex.len() - 4..])
}

/// 将 RFC 3339 时间转换为本地时区显示；无法解析时原样返回
pub fn format_local_time(rfc3339: &str) -> String {
    parse_rfc3339_string(rfc3339)
        .map(|utc_time| {
            let local_time = utc_time.with_timezone(&Local);
            local_time.format("%Y-%m-%d %H:%M:%S %Z").to_string()
        })
        .unwrap_or_else(|_| rfc3339.to_string())
}

/// 固定宽度的权限标记，例如 `M U -`
pub fn permission_badge(permissions: Permissions) -> String {
    let flag = |p: Permissions, c: char| if permissions.contains(p) { c } else { '-' };
    format!(
        "{} {} {}",
        flag(Permissions::MANAGE_PERMISSIONS, 'M'),
        flag(Permissions::UPLOAD, 'U'),
        flag(Permissions::DELETE, 'D')
    )
}
