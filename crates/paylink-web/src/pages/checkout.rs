//! Checkout Page

use leptos::prelude::*;
use paylink_client::{PaymentForm, Submitter};
use paylink_core::{Currency, FormField};

use crate::api;
use crate::components::{Confirmation, ErrorBanner, FieldError, SubmitButton, TextField};

#[component]
pub fn CheckoutPage() -> impl IntoView {
    let form = RwSignal::new(PaymentForm::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let mut fields = None;
        form.update(|f| fields = f.begin_submit());
        let Some(fields) = fields else {
            return;
        };

        let previous = form.with_untracked(|f| f.last_result().clone());
        leptos::task::spawn_local(async move {
            let result = api::submitter().submit(&previous, &fields).await;
            form.update(|f| f.finish(result));
        });
    };

    view! {
        <div class="checkout">
            <Show
                when=move || form.with(PaymentForm::is_succeeded)
                fallback=move || view! {
                    <form class="payment-form" on:submit=on_submit>
                        <TextField
                            form=form
                            field=FormField::Amount
                            label="Amount"
                            input_type="number"
                            step="0.01"
                        />

                        <div class="field">
                            <label for="currency">"Currency"</label>
                            <select
                                id="currency"
                                name="currency"
                                class=move || form.with(|f| f.input_style(FormField::Currency).css_class())
                                prop:value=move || form.with(|f| f.value(FormField::Currency).to_string())
                                on:change=move |ev| {
                                    form.update(|f| f.set_field(FormField::Currency, event_target_value(&ev)));
                                }
                            >
                                <option value="">"Select currency"</option>
                                {Currency::ALL
                                    .into_iter()
                                    .map(|c| view! { <option value=c.as_str()>{c.as_str()}</option> })
                                    .collect_view()}
                            </select>
                            <FieldError form=form field=FormField::Currency />
                        </div>

                        <TextField form=form field=FormField::Email label="Email" input_type="email" />

                        <ErrorBanner form=form />
                        <SubmitButton form=form />
                    </form>
                }
            >
                <Confirmation />
            </Show>
        </div>
    }
}
