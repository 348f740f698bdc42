use once_cell::sync::Lazy;

use crate::{
    NewUser,
    validation::{CompiledSchema, FieldSchema, FormSchema, FormValues, Rule, ValidationErrors},
};

pub mod user_fields {
    pub const NAME: &str = "name";
    pub const USERNAME: &str = "username";
    pub const EMAIL: &str = "email";
    pub const BRANCH: &str = "branch_id";
}

static CREATE_USER: Lazy<CompiledSchema> = Lazy::new(|| {
    FormSchema::default()
        .field(
            FieldSchema::new(user_fields::NAME, "Name")
                .rule(Rule::Required)
                .rule(Rule::MaxLength(120)),
        )
        .field(
            FieldSchema::new(user_fields::USERNAME, "Username")
                .rule(Rule::Required)
                .rule(Rule::MinLength(3))
                .rule(Rule::MaxLength(64))
                .rule(Rule::Pattern {
                    regex: r"^[a-z0-9_.\-]+$".into(),
                    message: "Username may only contain lowercase letters, digits, '.', '_' and '-'"
                        .into(),
                }),
        )
        .field(
            FieldSchema::new(user_fields::EMAIL, "Email")
                .rule(Rule::Required)
                .rule(Rule::Email),
        )
        .field(FieldSchema::new(user_fields::BRANCH, "Branch").rule(Rule::Required))
        .compile()
        .expect("built-in create-user schema is valid")
});

pub fn create_user_schema() -> &'static CompiledSchema {
    &CREATE_USER
}

impl NewUser {
    /// The same user with surrounding whitespace stripped from every text
    /// field. This is the value that gets validated and sent.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            branch_id: self.branch_id,
        }
    }

    pub fn form_values(&self) -> FormValues {
        FormValues::from([
            (user_fields::NAME.to_string(), self.name.clone()),
            (user_fields::USERNAME.to_string(), self.username.clone()),
            (user_fields::EMAIL.to_string(), self.email.clone()),
            (
                user_fields::BRANCH.to_string(),
                self.branch_id.as_ref().map(ToString::to_string).unwrap_or_default(),
            ),
        ])
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        create_user_schema().validate(&self.form_values()).into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NodeId;

    fn valid_user() -> NewUser {
        NewUser {
            name: "Lina Khoury".into(),
            username: "lina.k".into(),
            email: "lina@example.com".into(),
            branch_id: Some(NodeId::Int(5)),
        }
    }

    #[test]
    fn built_in_schema_compiles() {
        assert_eq!(create_user_schema().fields().len(), 4);
    }

    #[test]
    fn valid_user_passes() {
        assert_eq!(valid_user().validate(), Ok(()));
    }

    #[test]
    fn normalized_user_has_no_padding() {
        let user = NewUser {
            name: "  Lina Khoury ".into(),
            username: " lina.k ".into(),
            email: "lina@example.com\n".into(),
            ..valid_user()
        }
        .normalized();

        assert_eq!(user, valid_user());
    }

    #[test]
    fn missing_branch_is_reported() {
        let user = NewUser {
            branch_id: None,
            ..valid_user()
        };
        let errors = user.validate().unwrap_err();

        assert_eq!(errors.get(user_fields::BRANCH), Some("Branch is required"));
    }
}
