use std::fmt::Display;

use serde::Serialize;

use crate::{
    pages::{
        customer::{Customer, CustomerForm, Measurements, MeasurementsInput},
        item::Item,
        order::{NewLineItem, NewOrder, SelectedOption},
    },
    AdminError, AdminResult,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    #[default]
    Customer,
    Items,
    Measurements,
    Payment,
}

impl WizardStep {
    pub fn prev(self) -> Option<Self> {
        match self {
            WizardStep::Customer => None,
            WizardStep::Items => Some(WizardStep::Customer),
            WizardStep::Measurements => Some(WizardStep::Items),
            WizardStep::Payment => Some(WizardStep::Measurements),
        }
    }
}

impl Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            WizardStep::Customer => "customer",
            WizardStep::Items => "items",
            WizardStep::Measurements => "measurements",
            WizardStep::Payment => "payment",
        })
    }
}

/// Draft of an order being placed. Each step's data survives going back.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrder {
    step: WizardStep,
    customer: Option<Customer>,
    /// Last new-customer form entered
    customer_form: CustomerForm,
    products: Vec<NewLineItem>,
    measurements: MeasurementsInput,
    total_override: Option<f64>,
}

impl PlaceOrder {
    pub fn step(&self) -> WizardStep {
        self.step
    }
    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }
    pub fn products(&self) -> &[NewLineItem] {
        &self.products
    }

    /// A step may be (re)submitted once every step before it is complete.
    pub fn expect(&self, step: WizardStep) -> AdminResult<()> {
        if step > self.step {
            Err(AdminError::transition(format!(
                "Complete the {} step first",
                self.step
            )))
        } else {
            Ok(())
        }
    }

    pub fn remember_customer_form(&mut self, form: CustomerForm) {
        self.customer_form = form;
    }

    /// Selects the customer and loads their saved measurements. Switching to
    /// another customer drops whatever was entered for the previous one.
    pub fn choose_customer(&mut self, customer: Customer) {
        let same = self.customer.as_ref().is_some_and(|c| c.id == customer.id);
        if !same {
            self.measurements = customer.measurements.map(Into::into).unwrap_or_default();
        } else if let Some(saved) = customer.measurements {
            self.measurements = saved.into();
        }
        self.customer = Some(customer);
        self.step = WizardStep::Items;
    }

    /// Validates the line items against the catalog and prices them from it.
    pub fn set_products(&mut self, products: Vec<NewLineItem>, catalog: &[Item]) -> AdminResult<()> {
        self.products = products;
        let priced = check_products(&self.products, catalog)?;
        self.products = priced;
        self.step = self.step.max(WizardStep::Measurements);
        Ok(())
    }

    pub fn measurements_required(&self) -> bool {
        !self.customer.as_ref().is_some_and(Customer::has_measurement_file)
    }

    /// Returns the measurements to save on the customer, or `None` when the
    /// step is skipped because a measurement document exists.
    pub fn set_measurements(
        &mut self,
        input: Option<MeasurementsInput>,
    ) -> AdminResult<Option<Measurements>> {
        if let Some(input) = input.filter(|i| !i.is_blank()) {
            self.measurements = input;
        }
        if !self.measurements_required() && input.map_or(true, |i| i.is_blank()) {
            return Ok(None);
        }
        self.measurements.validate().map(Some)
    }

    pub fn measurements_done(&mut self, saved: Option<Measurements>) {
        if let (Some(saved), Some(customer)) = (saved, self.customer.as_mut()) {
            customer.measurements = Some(saved);
        }
        self.step = WizardStep::Payment;
    }

    pub fn set_total(&mut self, total: Option<f64>) -> AdminResult<()> {
        match total {
            Some(t) if t < 0.0 || !t.is_finite() => {
                Err(AdminError::validation("Total must not be negative"))
            }
            t => {
                if t.is_some() {
                    self.total_override = t;
                }
                Ok(())
            }
        }
    }

    /// Operator override, else the sum of line item prices
    pub fn total(&self) -> f64 {
        self.total_override
            .unwrap_or_else(|| self.products.iter().map(|p| p.price).sum())
    }

    pub fn order(&self) -> AdminResult<NewOrder> {
        self.expect(WizardStep::Payment)?;
        let customer = self
            .customer
            .as_ref()
            .ok_or_else(|| AdminError::validation("Please select a customer"))?;
        Ok(NewOrder {
            customer: customer.id.clone(),
            products: self.products.clone(),
            total: self.total(),
        })
    }

    pub fn back(&mut self) -> AdminResult<WizardStep> {
        let prev = self
            .step
            .prev()
            .ok_or_else(|| AdminError::transition("Already at the first step"))?;
        self.step = prev;
        Ok(prev)
    }
}

fn check_products(products: &[NewLineItem], catalog: &[Item]) -> AdminResult<Vec<NewLineItem>> {
    if products.is_empty() {
        return Err(AdminError::validation("Please add at least one item"));
    }
    if products.iter().any(|p| p.ty.trim().is_empty()) {
        return Err(AdminError::validation("Please select type for all items"));
    }
    products
        .iter()
        .map(|p| {
            let item = catalog
                .iter()
                .find(|i| i.name == p.ty)
                .ok_or_else(|| AdminError::validation(format!("Unknown item type `{}`", p.ty)))?;
            let mut options = Vec::with_capacity(p.options.len());
            for opt in p.options.iter().filter(|o| !o.customization.is_empty()) {
                if item.option(&opt.name).is_none() {
                    return Err(AdminError::validation(format!(
                        "{} has no option `{}`",
                        item.name, opt.name
                    )));
                }
                if !item.allows(&opt.name, &opt.customization) {
                    return Err(AdminError::validation(format!(
                        "`{}` is not a valid {} for {}",
                        opt.customization, opt.name, item.name
                    )));
                }
                options.push(SelectedOption {
                    name: opt.name.clone(),
                    customization: opt.customization.clone(),
                });
            }
            Ok(NewLineItem {
                ty: item.name.clone(),
                instructions: p.instructions.trim().to_owned(),
                price: item.price,
                options,
            })
        })
        .collect()
}
