//! Static keyword and pattern tables for intent scoring.
//!
//! Kept as plain data so tests can assert scoring behavior against the same
//! tables the scorer uses.

use crate::tool::entities::ToolId;

/// Lower-case keywords per tool. Matching is substring containment on the
/// lower-cased input, so partial-word hits ("searching") count.
pub const KEYWORD_TABLE: &[(ToolId, &[&str])] = &[
    (
        ToolId::Weather,
        &[
            "weather", "temperature", "forecast", "rain", "sunny", "humidity", "wind", "天气",
            "气温", "温度", "下雨", "预报",
        ],
    ),
    (
        ToolId::Calculator,
        &[
            "calculate", "compute", "math", "plus", "minus", "times", "divided", "multiply",
            "multiplied", "percent", "sum of", "计算", "等于", "乘以", "除以",
        ],
    ),
    (
        ToolId::Translator,
        &[
            "translate", "translation", "in english", "in chinese", "to english", "to chinese",
            "meaning of", "翻译", "英文", "中文", "英语",
        ],
    ),
    (
        ToolId::Search,
        &[
            "search", "look up", "lookup", "find", "who is", "what is", "tell me about",
            "information about", "wiki", "github", "repository", "搜索", "查找", "查询", "百科",
        ],
    ),
    (
        ToolId::QrGenerator,
        &["qr", "qr code", "qrcode", "barcode", "scan code", "二维码", "扫码"],
    ),
    (
        ToolId::ColorPalette,
        &[
            "color", "colour", "palette", "color scheme", "hex code", "颜色", "配色", "调色板",
            "色板",
        ],
    ),
    (
        ToolId::Login,
        &[
            "login", "log in", "sign in", "signin", "username", "password", "pwd", "credential",
            "登录", "登陆", "用户名", "密码",
        ],
    ),
];

/// Characters that mark arithmetic when a digit is also present.
pub const MATH_OPERATOR_CHARS: &[char] = &['+', '-', '*', '/', '×', '÷', '=', '%'];

/// Word that also counts as an operator ("15% of 200"). Matched as a whole
/// word, so "offers" or "profile" do not count.
pub const MATH_OPERATOR_WORD: &str = "of";

/// Bilingual city gazetteer: (canonical English name, Chinese name).
pub const CITY_GAZETTEER: &[(&str, &str)] = &[
    ("Beijing", "北京"),
    ("Shanghai", "上海"),
    ("Guangzhou", "广州"),
    ("Shenzhen", "深圳"),
    ("Hangzhou", "杭州"),
    ("Chengdu", "成都"),
    ("Wuhan", "武汉"),
    ("Nanjing", "南京"),
    ("Xi'an", "西安"),
    ("Chongqing", "重庆"),
    ("Tianjin", "天津"),
    ("Suzhou", "苏州"),
    ("Hong Kong", "香港"),
    ("Taipei", "台北"),
    ("Tokyo", "东京"),
    ("Osaka", "大阪"),
    ("Seoul", "首尔"),
    ("Singapore", "新加坡"),
    ("Bangkok", "曼谷"),
    ("Sydney", "悉尼"),
    ("London", "伦敦"),
    ("Paris", "巴黎"),
    ("Berlin", "柏林"),
    ("Moscow", "莫斯科"),
    ("New York", "纽约"),
    ("Los Angeles", "洛杉矶"),
    ("San Francisco", "旧金山"),
    ("Seattle", "西雅图"),
    ("Toronto", "多伦多"),
    ("Vancouver", "温哥华"),
];

/// Score added when the input has a digit and an operator.
pub const DIGIT_OPERATOR_BOOST: u32 = 5;
/// Score added for the `<number>% of <number>` form.
pub const PERCENT_OF_BOOST: u32 = 10;
/// Score added when any arithmetic pattern matches.
pub const ARITHMETIC_PATTERN_BOOST: u32 = 8;
/// Score added to the QR generator for an http(s) URL.
pub const URL_BOOST: u32 = 3;
/// Score added to weather for a gazetteer city.
pub const CITY_BOOST: u32 = 3;
/// Score added to login for the compact `user and pwd is U,P` idiom.
pub const COMPACT_CREDENTIAL_BOOST: u32 = 5;
/// Score added to login when at least [`KEYED_CREDENTIAL_MIN_FIELDS`]
/// credential fields appear as `key=value`, `key: value` or `key is value`.
pub const KEYED_CREDENTIAL_BOOST: u32 = 5;
pub const KEYED_CREDENTIAL_MIN_FIELDS: usize = 2;

/// Keywords for one tool
pub fn keywords_for(tool: ToolId) -> &'static [&'static str] {
    KEYWORD_TABLE
        .iter()
        .find(|(id, _)| *id == tool)
        .map(|(_, words)| *words)
        .unwrap_or(&[])
}

/// First gazetteer city mentioned in the input, as its English name.
pub fn find_city(input: &str) -> Option<&'static str> {
    let lower = input.to_lowercase();
    CITY_GAZETTEER
        .iter()
        .find(|(english, chinese)| lower.contains(&english.to_lowercase()) || input.contains(chinese))
        .map(|(english, _)| *english)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tool_has_keywords() {
        for tool in ToolId::ALL {
            assert!(!keywords_for(tool).is_empty(), "{tool} has no keywords");
        }
    }

    #[test]
    fn test_keywords_are_lower_case() {
        for (_, words) in KEYWORD_TABLE {
            for word in *words {
                assert_eq!(*word, word.to_lowercase());
            }
        }
    }

    #[test]
    fn test_find_city_bilingual() {
        assert_eq!(find_city("What's the weather in Beijing?"), Some("Beijing"));
        assert_eq!(find_city("上海今天天气怎么样"), Some("Shanghai"));
        assert_eq!(find_city("weather in new york"), Some("New York"));
        assert_eq!(find_city("weather in Atlantis"), None);
    }
}
