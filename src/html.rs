//! Shared HTML building blocks: style constants, the page layout and small widgets.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use unicode_segmentation::UnicodeSegmentation;

use crate::alert::{Alert, alert_container};

/// The max number of graphemes to display in table cells before truncating
/// and displaying ellipses.
pub const MAX_DESCRIPTION_GRAPHEMES: usize = 32;

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "px-4 py-2 bg-teal-500 \
    dark:bg-teal-600 disabled:bg-teal-700 hover:enabled:bg-teal-600 \
    hover:enabled:dark:bg-teal-700 text-white rounded";

pub const BUTTON_DELETE_STYLE: &str = "text-red-500 hover:text-red-700 p-2 \
    bg-transparent border-none cursor-pointer";

pub const FILTER_BUTTON_STYLE: &str = "px-3 py-1 rounded-full text-sm font-medium \
    bg-gray-100 text-gray-700 hover:bg-gray-200 \
    dark:bg-gray-700 dark:text-gray-200";

pub const FILTER_BUTTON_ACTIVE_STYLE: &str = "px-3 py-1 rounded-full text-sm font-medium \
    bg-teal-500 text-white";

// Form styles
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white disabled:text-gray-500 bg-gray-50 \
    dark:bg-gray-700 border border-gray-300 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:ring-teal-600 focus:border-teal-600 \
    focus:dark:border-teal-500 focus:dark:ring-teal-500";

// Table styles
pub const TABLE_HEADER_STYLE: &str = "text-left text-sm text-gray-500 border-b border-gray-200";

pub const TABLE_ROW_STYLE: &str = "hover:bg-gray-50 dark:hover:bg-gray-700";

pub const TABLE_CELL_STYLE: &str = "py-4";

// Cards
pub const CARD_STYLE: &str = "bg-white dark:bg-gray-800 rounded-lg shadow-md p-6";

// Page container
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col px-6 py-8 mx-auto max-w-screen-xl gap-6 text-gray-900 dark:text-white";

/// Extra elements for the page's `<head>`.
pub enum HeadElement {
    Style(PreEscaped<String>),
}

pub fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    base_with_alerts(title, head_elements, content, &[])
}

/// Like [base], but with `alerts` already showing when the page loads.
pub fn base_with_alerts(
    title: &str,
    head_elements: &[HeadElement],
    content: &Markup,
    alerts: &[Alert],
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                // Swap error responses too, they carry their own alerts.
                meta
                    name="htmx-config"
                    content=r#"{"responseHandling":[{"code":"204","swap":false},{"code":"...","swap":true}]}"#;
                title { (title) " - Expense Tracker" }
                script src="https://cdn.tailwindcss.com" {}
                link href="/static/dashboard.css" rel="stylesheet";
                link
                    rel="stylesheet"
                    href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css";

                script src="https://unpkg.com/htmx.org@2.0.8/dist/htmx.min.js" {}

                @for element in head_elements
                {
                    @match element
                    {
                        HeadElement::Style(text) => style { (text) }
                    }
                }
            }

            body
                hx-indicator="#indicator"
                class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)

                (alert_container(alerts))
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    // Template adapted from https://flowbite.com/blocks/marketing/404/
    let content = html!(
        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-teal-600 dark:text-teal-500"
                    {
                        (header)
                    }

                    p
                        class="mb-4 text-3xl md:text-4xl tracking-tight
                            font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p
                        class="mb-4 text-1xl md:text-2xl tracking-tight
                            text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a
                        href="/"
                        class="inline-flex text-white bg-teal-600
                            hover:bg-teal-800 focus:ring-4 focus:outline-hidden
                            focus:ring-teal-300 font-medium rounded text-sm px-5
                            py-2.5 text-center dark:focus:ring-teal-900 my-4"
                    {
                        "Back to Dashboard"
                    }
                }
            }
        }
    );

    base(title, &[], &content)
}

/// A spinner that is only visible while an htmx request is in flight.
pub fn loading_spinner() -> Markup {
    // Spinner SVG adapted from https://flowbite.com/docs/components/spinner/
    html! {
        span id="indicator" class="htmx-indicator"
        {
            svg
                aria-hidden="true"
                role="status"
                class="inline text-teal-500 w-6 h-6 animate-spin"
                viewBox="0 0 100 101"
                fill="none"
                xmlns="http://www.w3.org/2000/svg"
            {
                path
                    d="M100 50.5908C100 78.2051 77.6142 100.591 50 100.591C22.3858 100.591 0 78.2051 0 50.5908C0 22.9766 22.3858 0.59082 50 0.59082C77.6142 0.59082 100 22.9766 100 50.5908ZM9.08144 50.5908C9.08144 73.1895 27.4013 91.5094 50 91.5094C72.5987 91.5094 90.9186 73.1895 90.9186 50.5908C90.9186 27.9921 72.5987 9.67226 50 9.67226C27.4013 9.67226 9.08144 27.9921 9.08144 50.5908Z"
                    fill="#E5E7EB" {}
                path
                    d="M93.9676 39.0409C96.393 38.4038 97.8624 35.9116 97.0079 33.5539C95.2932 28.8227 92.871 24.3692 89.8167 20.348C85.8452 15.1192 80.8826 10.7238 75.2124 7.41289C69.5422 4.10194 63.2754 1.94025 56.7698 1.05124C51.7666 0.367541 46.6976 0.446843 41.7345 1.27873C39.2613 1.69328 37.813 4.19778 38.4501 6.62326C39.0873 9.04874 41.5694 10.4717 44.0505 10.1071C47.8511 9.54855 51.7191 9.52689 55.5402 10.0491C60.8642 10.7766 65.9928 12.5457 70.6331 15.2552C75.2735 17.9648 79.3347 21.5619 82.5849 25.841C84.9175 28.9121 86.7997 32.2913 88.1811 35.8758C89.083 38.2158 91.5421 39.6781 93.9676 39.0409Z"
                    fill="currentColor" {}
            }
        }
    }
}

/// Returns the CSS styles for adding a dollar sign prefix to number inputs.
pub fn dollar_input_styles() -> HeadElement {
    HeadElement::Style(PreEscaped(
        r#"
        .input-wrapper {
            position: relative;
            display: inline-block;
        }
        .input-wrapper input[type="number"] {
            padding-left: 1.4rem;
        }
        .input-wrapper::before {
            content: '$';
            position: absolute;
            left: 0.6rem;
            top: 50%;
            transform: translateY(-50%);
            pointer-events: none;
        }
        "#
        .to_owned(),
    ))
}

/// Shorten `text` to at most `max_graphemes` user-perceived characters.
///
/// Returns the text to display and, if it was shortened, the full text for a
/// tooltip.
pub fn truncate(text: &str, max_graphemes: usize) -> (String, Option<&str>) {
    if text.graphemes(true).count() <= max_graphemes {
        return (text.to_owned(), None);
    }

    let truncated: String = text
        .graphemes(true)
        .take(max_graphemes.saturating_sub(3))
        .collect();

    (truncated + "...", Some(text))
}
