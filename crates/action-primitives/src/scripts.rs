//! Page scripts behind [`crate::PageQuery`].
//!
//! Every script is a self-invoking function that returns `JSON.stringify(...)`
//! on success and `'ERROR: ' + message` when it throws.

use crate::query::LocateStrategy;

/// Shared helpers: stable per-query element keys and the node record shape
/// decoded as [`crate::RawNode`].
const NODE_RECORD: &str = r#"
        var keys = new Map();
        function keyOf(el) {
            if (!keys.has(el)) { keys.set(el, keys.size + 1); }
            return keys.get(el);
        }
        function record(el) {
            var rect = el.getBoundingClientRect();
            var style = window.getComputedStyle(el);
            var href = null;
            if (typeof el.href === 'string' && el.href) {
                href = el.href;
            } else if (el.getAttribute && el.getAttribute('data-href')) {
                href = el.getAttribute('data-href');
            }
            return {
                key: keyOf(el),
                tag: (el.tagName || '').toLowerCase(),
                id: typeof el.id === 'string' ? el.id : '',
                className: typeof el.className === 'string' ? el.className : null,
                title: el.getAttribute('title') || '',
                rect: { left: rect.left, top: rect.top, width: rect.width, height: rect.height },
                visibility: style.visibility,
                display: style.display,
                href: href
            };
        }
"#;

fn js_string(raw: &str) -> String {
    serde_json::Value::String(raw.to_string()).to_string()
}

pub(crate) fn locate(identifier: &str) -> String {
    let mut passes = String::new();
    for strategy in LocateStrategy::plan(identifier) {
        let lookup = match strategy {
            LocateStrategy::ElementById => "[document.getElementById(identifier)]".to_string(),
            LocateStrategy::Selector => "document.querySelectorAll(identifier)".to_string(),
            LocateStrategy::ClassName => {
                "document.getElementsByClassName(identifier.substring(1))".to_string()
            }
            other => format!(
                "document.querySelectorAll({})",
                js_string(&other.attribute_selector(identifier).unwrap_or_default())
            ),
        };
        passes.push_str(&format!(
            "        collect('{}', function () {{ return {}; }});\n",
            strategy.name(),
            lookup
        ));
    }

    format!(
        r#"(function (identifier) {{
    try {{
{record}
        var strategies = [];
        function collect(strategy, lookup) {{
            var entry = {{ strategy: strategy, matches: [], error: null }};
            try {{
                var found = lookup();
                for (var i = 0; i < found.length; i++) {{
                    if (found[i]) {{ entry.matches.push(record(found[i])); }}
                }}
            }} catch (e) {{
                entry.error = String((e && e.message) || e);
            }}
            strategies.push(entry);
        }}
{passes}
        return JSON.stringify({{
            viewport: {{ width: window.innerWidth, height: window.innerHeight }},
            strategies: strategies
        }});
    }} catch (e) {{
        return 'ERROR: ' + e.message;
    }}
}})({literal});"#,
        record = NODE_RECORD,
        passes = passes,
        literal = js_string(identifier)
    )
}

pub(crate) fn scroll_info() -> String {
    r#"(function () {
    try {
        var root = document.documentElement;
        return JSON.stringify({
            scrollTop: window.pageYOffset || root.scrollTop,
            scrollLeft: window.pageXOffset || root.scrollLeft,
            scrollWidth: root.scrollWidth,
            scrollHeight: root.scrollHeight,
            clientWidth: root.clientWidth,
            clientHeight: root.clientHeight,
            viewportWidth: window.innerWidth,
            viewportHeight: window.innerHeight
        });
    } catch (e) {
        return 'ERROR: ' + e.message;
    }
})();"#
        .to_string()
}

pub(crate) fn load_status() -> String {
    r#"(function () {
    try {
        var loading = 0;
        for (var i = 0; i < document.images.length; i++) {
            if (!document.images[i].complete) { loading++; }
        }
        return JSON.stringify({
            timestamp: Date.now(),
            documentReady: document.readyState === 'complete',
            loadingImages: loading,
            lazyElements: document.querySelectorAll('[data-lazy], [loading="lazy"], .lazy, .lazyload').length,
            totalElements: document.querySelectorAll('*').length
        });
    } catch (e) {
        return 'ERROR: ' + e.message;
    }
})();"#
        .to_string()
}

pub(crate) fn list_elements() -> String {
    format!(
        r#"(function () {{
    try {{
{record}
        var nodes = [];
        var all = document.querySelectorAll('*');
        for (var i = 0; i < all.length; i++) {{
            var el = all[i];
            var hasClass = typeof el.className === 'string' && el.className.length > 0;
            if (el.id || hasClass) {{ nodes.push(record(el)); }}
        }}
        return JSON.stringify({{
            viewport: {{ width: window.innerWidth, height: window.innerHeight }},
            nodes: nodes
        }});
    }} catch (e) {{
        return 'ERROR: ' + e.message;
    }}
}})();"#,
        record = NODE_RECORD
    )
}

/// Attributes whose value is a URL on any element.
const URL_ATTRIBUTES: &[&str] = &[
    "action",
    "formaction",
    "poster",
    "manifest",
    "background",
    "cite",
    "longdesc",
    "codebase",
    "archive",
    "ping",
    "usemap",
    "xlink:href",
];

pub(crate) fn list_urls() -> String {
    let attributes = URL_ATTRIBUTES
        .iter()
        .map(|attr| js_string(attr))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"(function () {{
    try {{
        var urls = [];
        function add(value, doc) {{
            if (typeof value !== 'string') {{ return; }}
            var v = value.trim();
            if (!v) {{ return; }}
            if (doc && doc !== document) {{
                try {{ v = new URL(v, doc.baseURI).href; }} catch (e) {{}}
            }}
            urls.push(v);
        }}
        function looksLinked(v) {{
            return /^(https?:)?\/\//i.test(v) || v.charAt(0) === '/';
        }}
        function cssUrls(text, doc, linkedOnly) {{
            if (!text || text === 'none') {{ return; }}
            var re = /url\(\s*(['"]?)(.*?)\1\s*\)/g;
            var m;
            while ((m = re.exec(text)) !== null) {{
                if (!linkedOnly || looksLinked(m[2].trim())) {{ add(m[2], doc); }}
            }}
        }}
        function each(doc, selector, fn) {{
            var found = doc.querySelectorAll(selector);
            for (var i = 0; i < found.length; i++) {{ fn(found[i]); }}
        }}
        function scan(doc) {{
            var view = doc.defaultView || window;
            each(doc, 'a[href], area[href]', function (el) {{ add(el.href, doc); }});
            each(doc, '[data-href]', function (el) {{ add(el.getAttribute('data-href'), doc); }});
            each(doc, '[onclick]', function (el) {{
                var code = el.getAttribute('onclick') || '';
                var re = /location(?:\.href)?\s*=\s*(['"])(.*?)\1/g;
                var m;
                while ((m = re.exec(code)) !== null) {{ add(m[2], doc); }}
            }});
            each(doc, 'img[src], script[src], iframe[src], frame[src], embed[src], source[src], video[src], audio[src], track[src], input[src]', function (el) {{
                add(el.getAttribute('src'), doc);
            }});
            each(doc, 'img[srcset], source[srcset]', function (el) {{
                el.getAttribute('srcset').split(',').forEach(function (part) {{
                    add(part.trim().split(/\s+/)[0], doc);
                }});
            }});
            each(doc, 'link[href]', function (el) {{ add(el.getAttribute('href'), doc); }});
            each(doc, 'object[data]', function (el) {{ add(el.getAttribute('data'), doc); }});
            [{attributes}].forEach(function (attr) {{
                var selector = '[' + attr.replace(':', '\\:') + ']';
                try {{
                    each(doc, selector, function (el) {{ add(el.getAttribute(attr), doc); }});
                }} catch (e) {{}}
            }});
            each(doc, '[style]', function (el) {{ cssUrls(el.getAttribute('style'), doc, true); }});
            var all = doc.querySelectorAll('*');
            for (var i = 0; i < all.length; i++) {{
                var el = all[i];
                try {{ cssUrls(view.getComputedStyle(el).backgroundImage, doc, false); }} catch (e) {{}}
                for (var j = 0; j < el.attributes.length; j++) {{
                    var attr = el.attributes[j];
                    if (attr.name.indexOf('data-') === 0 && attr.name !== 'data-href' && looksLinked(attr.value.trim())) {{
                        add(attr.value, doc);
                    }}
                }}
            }}
        }}
        scan(document);
        each(document, 'meta[http-equiv]', function (meta) {{
            if ((meta.getAttribute('http-equiv') || '').toLowerCase() !== 'refresh') {{ return; }}
            var m = /url\s*=\s*['"]?([^'";]+)/i.exec(meta.getAttribute('content') || '');
            if (m) {{ add(m[1], document); }}
        }});
        each(document, 'meta[property^="og:"], meta[name^="og:"], meta[name="twitter:image"], meta[property="twitter:image"]', function (meta) {{
            var content = (meta.getAttribute('content') || '').trim();
            if (looksLinked(content)) {{ add(content, document); }}
        }});
        each(document, 'iframe', function (frame) {{
            try {{
                var inner = frame.contentDocument;
                if (inner) {{ scan(inner); }}
            }} catch (e) {{}}
        }});
        return JSON.stringify({{ baseUrl: document.baseURI, urls: urls }});
    }} catch (e) {{
        return 'ERROR: ' + e.message;
    }}
}})();"#,
        attributes = attributes
    )
}

pub(crate) fn find_link(url: &str) -> String {
    format!(
        r#"(function (target) {{
    try {{
        function strip(u) {{
            var i = u.indexOf('#');
            return i < 0 ? u : u.substring(0, i);
        }}
        function cssPath(el) {{
            var parts = [];
            while (el && el.nodeType === 1 && el !== document.documentElement) {{
                if (el.id) {{
                    parts.unshift('#' + CSS.escape(el.id));
                    return parts.join(' > ');
                }}
                var index = 1;
                var sibling = el;
                while ((sibling = sibling.previousElementSibling)) {{
                    if (sibling.tagName === el.tagName) {{ index++; }}
                }}
                parts.unshift(el.tagName.toLowerCase() + ':nth-of-type(' + index + ')');
                el = el.parentElement;
            }}
            parts.unshift('html');
            return parts.join(' > ');
        }}
        var wanted = target;
        try {{ wanted = new URL(target, document.baseURI).href; }} catch (e) {{}}
        wanted = strip(wanted);
        var anchors = document.querySelectorAll('a[href], area[href]');
        for (var i = 0; i < anchors.length; i++) {{
            var a = anchors[i];
            if (strip(a.href) === wanted) {{
                return JSON.stringify({{
                    found: true,
                    identifier: a.id ? '#' + CSS.escape(a.id) : cssPath(a),
                    title: (a.getAttribute('title') || '').substring(0, 20)
                }});
            }}
        }}
        return JSON.stringify({{ found: false, identifier: null, title: '' }});
    }} catch (e) {{
        return 'ERROR: ' + e.message;
    }}
}})({literal});"#,
        literal = js_string(url)
    )
}
