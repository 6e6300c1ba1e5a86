use serde::Serialize;

// Static data behind the dashboard widgets. There is no live weather or news
// feed; the frontend only needs something shaped like one.

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Weather {
    pub temp: &'static str,
    pub condition: &'static str,
    pub forecast: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsItem {
    pub title: &'static str,
    pub source: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppLink {
    pub name: &'static str,
    pub url: &'static str,
    pub icon: &'static str,
}

pub fn weather() -> Weather {
    Weather {
        temp: "19°C",
        condition: "Cloudy",
        forecast: vec!["19°", "20°", "18°", "17°", "19°"],
    }
}

pub fn news() -> Vec<NewsItem> {
    vec![
        NewsItem {
            title: "Tech giants announce new AI pact",
            source: "TechCrunch",
        },
        NewsItem {
            title: "Global wellness trends for 2025",
            source: "BBC Health",
        },
    ]
}

pub fn apps() -> Vec<AppLink> {
    vec![
        AppLink {
            name: "Google",
            url: "https://google.com",
            icon: "https://www.google.com/s2/favicons?domain=google.com&sz=64",
        },
        AppLink {
            name: "Gemini",
            url: "https://gemini.google.com",
            icon: "https://www.gstatic.com/lamda/images/gemini_favicon_f069958c85030456e93de685481c559f160ea06b.png",
        },
        AppLink {
            name: "Drive",
            url: "https://drive.google.com",
            icon: "https://www.google.com/s2/favicons?domain=drive.google.com&sz=64",
        },
        AppLink {
            name: "YouTube",
            url: "https://youtube.com",
            icon: "https://www.google.com/s2/favicons?domain=youtube.com&sz=64",
        },
        AppLink {
            name: "Maps",
            url: "https://maps.google.com",
            icon: "https://www.google.com/s2/favicons?domain=maps.google.com&sz=64",
        },
        AppLink {
            name: "Photos",
            url: "https://photos.google.com",
            icon: "https://www.google.com/s2/favicons?domain=photos.google.com&sz=64",
        },
    ]
}
