use serde::Deserialize;
use validator::Validate;

use crate::domain::types::PageSize;
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Page selected in the pagination control.
pub struct PageForm {
    #[validate(range(min = 1))]
    pub page: u32,
}

#[derive(Debug, Deserialize)]
/// Page size picked from the pagination control's menu.
pub struct PageSizeForm {
    pub limit: u32,
}

impl TryFrom<PageSizeForm> for PageSize {
    type Error = FormError;

    fn try_from(form: PageSizeForm) -> Result<Self, Self::Error> {
        Ok(PageSize::new(form.limit)?)
    }
}
