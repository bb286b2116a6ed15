//! Built-in form definitions.

use formkit_core::{FieldValue, function_name_rules, service_name_rules};
use formkit_widgets::{SelectOption, WidgetKind};

use crate::definition::{FieldDefinition, FormDefinition};

/// Runtimes offered by the function form; the first one is the default.
pub fn runtime_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("Go", "golang"),
        SelectOption::new("Java", "java"),
        SelectOption::new("NodeJs", "nodejs"),
        SelectOption::new("Python 3.7", "python:3.7"),
        SelectOption::new("Python 3.9", "python:3.9"),
    ]
}

/// Optional categories of the function form.
pub fn category_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("Data Collection", "collect"),
        SelectOption::new("Data Processing", "process"),
        SelectOption::new("Analytics & Reporting", "report"),
        SelectOption::new("Sorting, filtering, tagging", "sort"),
    ]
}

/// Permissions of the function form; `read` is checked by default.
pub fn permission_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("Read files", "read"),
        SelectOption::new("Write files", "write"),
        SelectOption::new("Execute files", "execute"),
    ]
}

/// The "create new function" form.
///
/// Starts invalid: the function and service names are required and empty.
///
/// ```
/// use formkit_config::presets::create_function_form;
///
/// let session = create_function_form().build_session().unwrap();
/// assert!(!session.is_valid());
/// assert_eq!(session.widgets().len(), 6);
/// ```
pub fn create_function_form() -> FormDefinition {
    let fields = vec![
        FieldDefinition {
            name: "metadata.name".to_string(),
            label: Some("Function Name:".to_string()),
            widget: WidgetKind::Text,
            required: true,
            rules: Some(function_name_rules()),
            options: Vec::new(),
            default: FieldValue::text(""),
        },
        FieldDefinition {
            name: "spec.description".to_string(),
            label: Some("Description :".to_string()),
            widget: WidgetKind::Textarea,
            required: false,
            rules: None,
            options: Vec::new(),
            default: FieldValue::text(""),
        },
        FieldDefinition {
            name: "spec.runtime".to_string(),
            label: Some("Runtime:".to_string()),
            widget: WidgetKind::Select,
            required: false,
            rules: None,
            options: runtime_options(),
            default: FieldValue::text("golang"),
        },
        FieldDefinition {
            name: "metadata.categories".to_string(),
            label: Some("Categories:".to_string()),
            widget: WidgetKind::Checkbox,
            required: false,
            rules: None,
            options: category_options(),
            default: FieldValue::multi(Vec::<String>::new()),
        },
        FieldDefinition {
            name: "spec.serviceName".to_string(),
            label: Some("Service Name:".to_string()),
            widget: WidgetKind::Text,
            required: true,
            rules: Some(service_name_rules()),
            options: Vec::new(),
            default: FieldValue::text(""),
        },
        FieldDefinition {
            name: "spec.permissions".to_string(),
            label: Some("Permissions:".to_string()),
            widget: WidgetKind::Checkbox,
            required: true,
            rules: None,
            options: permission_options(),
            default: FieldValue::multi(["read"]),
        },
    ];

    FormDefinition {
        version: "1.0".to_string(),
        title: Some("Create New Form".to_string()),
        fields,
    }
}
