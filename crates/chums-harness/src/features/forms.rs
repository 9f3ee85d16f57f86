//! Form scenarios: list, open, create/edit/delete with a question.

use super::{run_feature, Feature, FeatureOutcome};
use crate::context::TestContext;
use crate::helpers::generic::{expect_count, expect_url};
use crate::page_object::{ListScreen, UrlPattern};
use crate::pages::{FormDetailsPage, FormsPage};
use crate::result::{HarnessError, HarnessResult};
use tracing::info;

/// The form list renders its table or its empty state
pub async fn display(ctx: &TestContext) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, Feature::Forms, |ctx| async move {
        let forms = FormsPage::new(ctx.page().clone());
        forms.expect_forms_displayed().await?;
        let archived = forms.open_archived().await?;
        if archived {
            forms.expect_forms_displayed().await?;
        }
        Ok(FeatureOutcome::completed_if(archived, "archived tab not shown"))
    })
    .await
}

/// Open the first listed form
pub async fn open_first(ctx: &TestContext) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, Feature::Forms, |ctx| async move {
        let forms = FormsPage::new(ctx.page().clone());
        if !forms.click_first_form().await? {
            return Ok(FeatureOutcome::completed_if(false, "no forms listed"));
        }
        FormDetailsPage::new(ctx.page().clone())
            .expect_form_displayed()
            .await?;
        Ok(FeatureOutcome::Completed)
    })
    .await
}

/// Create a form, add a question, rename the form, then delete it
pub async fn crud(ctx: &TestContext, name: &str, question: &str) -> HarnessResult<FeatureOutcome> {
    run_feature(ctx, Feature::Forms, |ctx| async move {
        let page = ctx.page().clone();
        let forms = FormsPage::new(page.clone());
        if !forms.add_form(name).await? {
            return Ok(FeatureOutcome::completed_if(false, "add form not offered"));
        }
        if !forms.click_form(name).await? {
            return Err(HarnessError::assertion(format!("form {name} not listed after adding")));
        }

        let form = FormDetailsPage::new(page.clone());
        form.expect_form_displayed().await?;
        let mut outcome = FeatureOutcome::completed_if(form.open_questions().await?, "questions tab not shown");
        let before = form.question_count().await?;
        if form.add_question(question).await? {
            expect_count(&page, &form.question_rows, before + 1).await?;
        } else {
            outcome = outcome.and(FeatureOutcome::completed_if(false, "add question not offered"));
        }

        let renamed = format!("{name} v2");
        outcome = outcome.and(FeatureOutcome::completed_if(
            form.edit_form_name(&renamed).await?,
            "form settings not editable",
        ));

        if !form.delete_form().await? {
            return Ok(outcome.and(FeatureOutcome::completed_if(false, "delete not offered")));
        }
        expect_url(&page, &UrlPattern::exact(FormsPage::PATH)).await?;
        let rows = forms.row_count().await?;
        info!(name, rows, "form added, edited and deleted");
        Ok(outcome)
    })
    .await
}
