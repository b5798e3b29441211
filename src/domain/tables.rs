use phf::{phf_map, phf_ordered_set, phf_set};

/// Well-known typos of popular provider domains.
pub(crate) static DOMAIN_CORRECTIONS: phf::Map<&'static str, &'static str> = phf_map! {
    "gmial.com" => "gmail.com",
    "gmai.com" => "gmail.com",
    "gmail.co" => "gmail.com",
    "gmali.com" => "gmail.com",
    "gmaill.com" => "gmail.com",
    "gmeil.com" => "gmail.com",
    "yahooo.com" => "yahoo.com",
    "yahoo.co" => "yahoo.com",
    "yaho.com" => "yahoo.com",
    "yahho.com" => "yahoo.com",
    "ymail.co" => "ymail.com",
    "hotmial.com" => "hotmail.com",
    "hotmai.com" => "hotmail.com",
    "hotmil.com" => "hotmail.com",
    "outlok.com" => "outlook.com",
    "outloo.com" => "outlook.com",
    "outlokc.com" => "outlook.com",
    "live.co" => "live.com",
    "msn.co" => "msn.com",
    "iclou.com" => "icloud.com",
};

/// Large mail operators. Iteration order is the fuzzy-match tie-break order.
pub(crate) static POPULAR_PROVIDERS: phf::OrderedSet<&'static str> = phf_ordered_set! {
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "icloud.com",
    "protonmail.com",
    "aol.com",
    "live.com",
    "msn.com",
    "ymail.com",
    "rocketmail.com",
};

pub(crate) static DISPOSABLE_DOMAINS: phf::Set<&'static str> = phf_set! {
    "10minutemail.com",
    "guerrillamail.com",
    "mailinator.com",
    "tempmail.org",
    "yopmail.com",
    "throwaway.email",
    "temp-mail.org",
    "mohmal.com",
    "sharklasers.com",
    "getairmail.com",
    "maildrop.cc",
    "33mail.com",
    "spamgourmet.com",
    "temporaryemail.net",
};
